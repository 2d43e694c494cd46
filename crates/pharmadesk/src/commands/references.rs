//! Reference list handlers (zones, codes, controlled substances).

use pharmadesk_core::Reference;
use tabled::Tabled;

use crate::cli::{GlobalOpts, ReferencesArgs, ReferencesCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

#[derive(Tabled)]
struct ReferenceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Reference> for ReferenceRow {
    fn from(r: &Reference) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name.clone(),
        }
    }
}

pub async fn handle(
    ctx: &Context,
    args: ReferencesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let api = ctx.console.api();
    let pb = util::spinner("Loading", global);
    let result = match args.command {
        ReferencesCommand::Zones => api.list_zones().await,
        ReferencesCommand::Codes => api.list_codes().await,
        ReferencesCommand::Substances => api.list_substances().await,
    };
    pb.finish_and_clear();

    let rows: Vec<Reference> = result
        .map_err(pharmadesk_core::CoreError::from)?
        .into_iter()
        .map(Reference::from)
        .collect();

    let out = output::render_list(&global.output, &rows, |x| ReferenceRow::from(x), |r| {
        r.id.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
