//! Owner command handlers.

use pharmadesk_core::{EntityId, Form, Owner, OwnerSchema, Resource};
use tabled::Tabled;

use crate::cli::{GlobalOpts, OwnerFields, OwnersArgs, OwnersCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OwnerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "CI")]
    ci: String,
    #[tabled(rename = "Cellphone")]
    cellphone: String,
    #[tabled(rename = "E-mail")]
    gmail: String,
}

impl From<&Owner> for OwnerRow {
    fn from(o: &Owner) -> Self {
        Self {
            id: o.id.to_string(),
            name: o.full_name(),
            ci: o.ci.clone(),
            cellphone: o.cellphone.clone(),
            gmail: output::or_dash(o.gmail.as_deref()),
        }
    }
}

fn detail(o: &Owner) -> Vec<(&'static str, String)> {
    vec![
        ("ID", o.id.to_string()),
        ("Name", o.name.clone()),
        ("First surname", o.first_last_name.clone()),
        ("Second surname", output::or_dash(o.second_surname.as_deref())),
        ("CI", o.ci.clone()),
        ("Cellphone", o.cellphone.clone()),
        ("E-mail", output::or_dash(o.gmail.as_deref())),
    ]
}

fn apply(form: &mut Form<OwnerSchema>, fields: &OwnerFields) -> Result<(), CliError> {
    util::apply_fields(
        form,
        &[
            ("name", fields.name.as_ref()),
            ("fistLastName", fields.first_last_name.as_ref()),
            ("secondSurname", fields.second_surname.as_ref()),
            ("ci", fields.ci.as_ref()),
            ("cellphone", fields.cellphone.as_ref()),
            ("gmail", fields.email.as_ref()),
        ],
    )
}

fn print_one(owner: &Owner, global: &GlobalOpts) {
    let out = output::render_single(&global.output, owner, detail, |o| o.id.to_string());
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: OwnersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        OwnersCommand::List { filter } => {
            let page = util::load_page::<Owner>(ctx, global).await?;
            let rows = util::page_rows(&page, filter.as_deref());
            let out = output::render_list(&global.output, &rows, |x| OwnerRow::from(x), |o| {
                o.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OwnersCommand::Get { id } => {
            let owner = Owner::fetch(ctx.console.api(), &EntityId::from(id.as_str())).await?;
            print_one(&owner, global);
            Ok(())
        }

        OwnersCommand::Create(fields) => {
            let mut form = Form::<OwnerSchema>::create();
            apply(&mut form, &fields)?;
            let owner = util::submit(&mut form, ctx, global).await?;
            print_one(&owner, global);
            Ok(())
        }

        OwnersCommand::Update { id, fields } => {
            let current = Owner::fetch(ctx.console.api(), &EntityId::from(id.as_str())).await?;
            let mut form = Form::<OwnerSchema>::edit(&current);
            apply(&mut form, &fields)?;
            let owner = util::submit(&mut form, ctx, global).await?;
            print_one(&owner, global);
            Ok(())
        }

        OwnersCommand::Delete { id } => util::delete_resource::<Owner>(ctx, &id, global).await,
    }
}
