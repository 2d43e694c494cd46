//! Shift report handlers.

use pharmadesk_core::shift_report::{current_month, parse_month};
use pharmadesk_core::{EmailSummary, Reference, Shift, ShiftFilter, ShiftReport};
use tabled::Tabled;

use crate::cli::{GlobalOpts, ShiftFilterArgs, ShiftsArgs, ShiftsCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct ShiftRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Pharmacy")]
    pharmacy: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "E-mail")]
    email: String,
}

impl From<&Shift> for ShiftRow {
    fn from(s: &Shift) -> Self {
        Self {
            date: s
                .date()
                .map_or_else(|| s.shift_date.clone(), |d| d.format("%Y-%m-%d").to_string()),
            code: s.pharmacy_code.clone(),
            pharmacy: s.pharmacy_name.clone(),
            owner: output::or_dash(s.owner_name.as_deref()),
            email: output::or_dash(s.owner_email.as_deref()),
        }
    }
}

fn summary_detail(s: &EmailSummary) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("Message", s.message.clone()),
        ("Sent", s.succeeded.to_string()),
        ("Failed", s.failed.to_string()),
    ];
    for detail in &s.details {
        fields.push(("Detail", detail.to_string()));
    }
    fields
}

/// Match `--code` against the known pharmacy codes, case-insensitively.
fn resolve_code(code: Option<String>, codes: &[Reference]) -> Result<Option<String>, CliError> {
    let Some(code) = code.filter(|c| !c.trim().is_empty()) else {
        return Ok(None);
    };
    codes
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(code.trim()))
        .map(|r| Some(r.name.clone()))
        .ok_or_else(|| {
            let known: Vec<_> = codes.iter().map(|r| r.name.as_str()).collect();
            CliError::Validation {
                field: "code".into(),
                reason: format!("unknown code '{code}' (known: {})", known.join(", ")),
            }
        })
}

async fn load_report(
    ctx: &Context,
    args: ShiftFilterArgs,
    global: &GlobalOpts,
) -> Result<ShiftReport, CliError> {
    let month = match args.month {
        Some(ref raw) => parse_month(raw).ok_or_else(|| CliError::Validation {
            field: "month".into(),
            reason: format!("'{raw}' is not a month (1-12 or a name)"),
        })?,
        None => current_month(),
    };
    let api = ctx.console.api();

    let code = if args.code.is_some() {
        let mut lookup = ShiftReport::new();
        let pb = util::spinner("Loading codes", global);
        let loaded = lookup.load_codes(api).await;
        pb.finish_and_clear();
        loaded?;
        resolve_code(args.code, lookup.codes())?
    } else {
        None
    };

    let mut report = ShiftReport::with_filter(ShiftFilter { code, month });
    let pb = util::spinner("Loading shifts", global);
    let loaded = report.refresh(api).await;
    pb.finish_and_clear();
    loaded?;
    Ok(report)
}

pub async fn handle(ctx: &Context, args: ShiftsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ShiftsCommand::List(filter) => {
            let report = load_report(ctx, filter, global).await?;
            let out = output::render_list(&global.output, report.shifts(), |x| ShiftRow::from(x), |s| {
                s.pharmacy_id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShiftsCommand::SendEmails(filter) => {
            let mut report = load_report(ctx, filter, global).await?;
            let count = report.shifts().len();
            let month = report.filter().month.name();

            let prompt = format!("E-mail {count} owners their {month} shifts?");
            if count > 0 && !util::confirm(&prompt, global)? {
                if !global.quiet {
                    eprintln!("Aborted");
                }
                return Ok(());
            }

            let pb = util::spinner("Sending e-mails", global);
            let result = report.send_emails(ctx.console.api()).await;
            pb.finish_and_clear();
            let summary = result?;

            if let Some(message) = report.success() {
                if summary.failed > 0 {
                    output::warning(message, global);
                } else {
                    output::success(message, global);
                }
            }

            let out = output::render_single(&global.output, &summary, summary_detail, |s| {
                s.succeeded.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pharmadesk_core::EntityId;

    use super::*;

    fn codes() -> Vec<Reference> {
        vec![
            Reference {
                id: EntityId::Numeric(1),
                name: "A1".into(),
            },
            Reference {
                id: EntityId::Numeric(2),
                name: "B2".into(),
            },
        ]
    }

    #[test]
    fn code_match_is_case_insensitive() {
        assert_eq!(resolve_code(Some("a1".into()), &codes()).unwrap(), Some("A1".into()));
    }

    #[test]
    fn blank_code_means_all() {
        assert_eq!(resolve_code(Some("  ".into()), &codes()).unwrap(), None);
        assert_eq!(resolve_code(None, &codes()).unwrap(), None);
    }

    #[test]
    fn unknown_code_lists_known_ones() {
        let err = resolve_code(Some("Z9".into()), &codes()).unwrap_err();
        assert!(err.to_string().contains("code"));
        match err {
            CliError::Validation { reason, .. } => assert!(reason.contains("A1, B2")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
