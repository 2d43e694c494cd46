//! User command handlers.

use pharmadesk_core::{EntityId, Form, Resource, User, UserSchema};
use tabled::Tabled;

use crate::cli::{GlobalOpts, UserFields, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "E-mail")]
    gmail: String,
    #[tabled(rename = "Role")]
    rol: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            gmail: u.gmail.clone(),
            rol: u.rol.clone(),
        }
    }
}

fn detail(u: &User) -> Vec<(&'static str, String)> {
    vec![
        ("ID", u.id.to_string()),
        ("Username", u.username.clone()),
        ("E-mail", u.gmail.clone()),
        ("Role", u.rol.clone()),
    ]
}

/// The new password: flag or env, an explicit prompt, or (on create) an
/// implicit prompt.
fn password(fields: &UserFields, creating: bool) -> Result<Option<String>, CliError> {
    if let Some(ref password) = fields.password {
        return Ok(Some(password.clone()));
    }
    if fields.ask_password || creating {
        let password = rpassword::prompt_password("New password: ").map_err(util::prompt_err)?;
        let again = rpassword::prompt_password("Repeat password: ").map_err(util::prompt_err)?;
        if password != again {
            return Err(CliError::Validation {
                field: "password".into(),
                reason: "passwords do not match".into(),
            });
        }
        return Ok(Some(password));
    }
    Ok(None)
}

fn apply(form: &mut Form<UserSchema>, fields: &UserFields, creating: bool) -> Result<(), CliError> {
    util::apply_fields(
        form,
        &[
            ("username", fields.username.as_ref()),
            ("gmail", fields.email.as_ref()),
            ("rol", fields.role.as_ref()),
        ],
    )?;
    if let Some(password) = password(fields, creating)? {
        form.set("password", password).map_err(util::form_error)?;
    }
    Ok(())
}

fn print_one(user: &User, global: &GlobalOpts) {
    let out = output::render_single(&global.output, user, detail, |u| u.id.to_string());
    output::print_output(&out, global.quiet);
}

pub async fn handle(ctx: &Context, args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List { filter } => {
            let page = util::load_page::<User>(ctx, global).await?;
            let rows = util::page_rows(&page, filter.as_deref());
            let out = output::render_list(&global.output, &rows, |x| UserRow::from(x), |u| {
                u.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Get { id } => {
            let user = User::fetch(ctx.console.api(), &EntityId::from(id.as_str())).await?;
            print_one(&user, global);
            Ok(())
        }

        UsersCommand::Create(fields) => {
            let mut form = Form::<UserSchema>::create();
            apply(&mut form, &fields, true)?;
            let user = util::submit(&mut form, ctx, global).await?;
            print_one(&user, global);
            Ok(())
        }

        UsersCommand::Update { id, fields } => {
            let current = User::fetch(ctx.console.api(), &EntityId::from(id.as_str())).await?;
            let mut form = Form::<UserSchema>::edit(&current);
            apply(&mut form, &fields, false)?;
            let user = util::submit(&mut form, ctx, global).await?;
            print_one(&user, global);
            Ok(())
        }

        UsersCommand::Delete { id } => util::delete_resource::<User>(ctx, &id, global).await,
    }
}
