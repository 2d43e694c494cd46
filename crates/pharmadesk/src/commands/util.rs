//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pharmadesk_core::{CoreError, EntityId, Form, FormSchema, ListPage, Resource, SubmitOutcome};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::Context;

/// Spinner on stderr while a request is in flight; hidden when quiet or
/// not attached to a terminal.
pub fn spinner(message: &str, global: &GlobalOpts) -> ProgressBar {
    if global.quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, global: &GlobalOpts) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').to_owned(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Load a resource's full list page.
pub async fn load_page<R: Resource>(
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<ListPage<R>, CliError> {
    let mut page = ListPage::<R>::new();
    let pb = spinner(&format!("Loading {}", R::PLURAL), global);
    let result = page.load(ctx.console.api()).await;
    pb.finish_and_clear();
    result?;
    Ok(page)
}

/// Rows of a loaded page, optionally narrowed by a name filter.
pub fn page_rows<R: Resource>(page: &ListPage<R>, filter: Option<&str>) -> Vec<R> {
    match filter {
        Some(q) => page.filtered(q).into_iter().cloned().collect(),
        None => page.rows().map(<[R]>::to_vec).unwrap_or_default(),
    }
}

/// Apply every provided flag to a form; `None` leaves the field as is.
pub fn apply_fields<S: FormSchema>(
    form: &mut Form<S>,
    fields: &[(&str, Option<&String>)],
) -> Result<(), CliError> {
    for (name, value) in fields {
        if let Some(value) = value {
            form.set(name, value.as_str()).map_err(form_error)?;
        }
    }
    Ok(())
}

/// Command-line flag for a form field.
pub fn flag_for(field: &str) -> String {
    let flag = match field {
        "fistLastName" => "first-last-name",
        "secondSurname" => "second-surname",
        "gmail" => "email",
        "rol" => "role",
        "recordNumber" => "record-number",
        "latitude" => "lat",
        "longitude" => "lng",
        "businessName" => "business-name",
        "Zone_id" => "zone",
        "Owner_id" => "owner",
        "Code_id" => "code",
        "User_id" => "user",
        "ControlledSubstances_id" => "substances",
        "openingHours" => "hours",
        "sectorType" => "sector",
        other => other,
    };
    format!("--{flag}")
}

/// Report form failures in terms of flags rather than wire field names.
pub fn form_error(err: CoreError) -> CliError {
    match err {
        CoreError::MissingFields { fields } => CliError::MissingFields {
            fields: fields.iter().map(|f| flag_for(f)).collect::<Vec<_>>().join(", "),
        },
        CoreError::InvalidField { field, reason } => CliError::Validation {
            field: flag_for(&field),
            reason,
        },
        other => other.into(),
    }
}

/// Submit a form and report the outcome on stderr.
pub async fn submit<S: FormSchema>(
    form: &mut Form<S>,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<S::Record, CliError> {
    let pb = spinner("Saving", global);
    let result = form.submit(ctx.console.api()).await;
    pb.finish_and_clear();
    let outcome = result.map_err(form_error)?;
    report_outcome(&outcome, global);
    Ok(outcome.into_record())
}

pub fn report_outcome<R: Resource>(outcome: &SubmitOutcome<R>, global: &GlobalOpts) {
    let verb = match outcome {
        SubmitOutcome::Created(_) => "created",
        SubmitOutcome::Updated(_) => "updated",
    };
    output::success(
        &format!("{} {verb}: {}", capitalize(R::KIND), outcome.record().display_name()),
        global,
    );
}

/// Confirm and delete one record.
///
/// Without `--yes` the prompt needs a terminal; the request is never sent
/// unless the user agrees.
pub async fn delete_resource<R: Resource>(
    ctx: &Context,
    id: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id = EntityId::from(id);
    let mut page = load_page::<R>(ctx, global).await?;

    let mut refusal = None;
    let deleted = page
        .delete(ctx.console.api(), &id, |prompt| {
            hold_refusal(confirm(prompt, global), &mut refusal)
        })
        .await?;

    if let Some(err) = refusal {
        return Err(err);
    }

    if deleted {
        output::success(&format!("{} {id} deleted", capitalize(R::KIND)), global);
    } else if !global.quiet {
        eprintln!("Aborted");
    }
    Ok(())
}

/// Turn a confirmation result into the plain answer a core callback wants,
/// parking any error for the caller to return once the callback is done.
fn hold_refusal(answer: Result<bool, CliError>, slot: &mut Option<CliError>) -> bool {
    answer.unwrap_or_else(|e| {
        *slot = Some(e);
        false
    })
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_prompt_is_reported_not_treated_as_no() {
        let mut slot = None;
        let answer = hold_refusal(Err(prompt_err("not a tty")), &mut slot);
        assert!(!answer);
        match slot {
            Some(CliError::Validation { reason, .. }) => assert!(reason.contains("not a tty")),
            other => panic!("unexpected {other:?}"),
        }

        let mut slot = None;
        assert!(hold_refusal(Ok(true), &mut slot));
        assert!(slot.is_none());
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("pharmacy"), "Pharmacy");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn missing_fields_name_the_flags() {
        let err = form_error(CoreError::MissingFields {
            fields: vec!["fistLastName".into(), "Zone_id".into(), "ci".into()],
        });
        assert_eq!(
            err.to_string(),
            "Missing required fields: --first-last-name, --zone, --ci"
        );
    }
}
