//! Pharmacy command handlers.

use pharmadesk_core::form::image::is_data_url;
use pharmadesk_core::resource::search_pharmacies;
use pharmadesk_core::{EntityId, Pharmacy, PharmacyForm, Resource};
use tabled::Tabled;

use crate::cli::{GlobalOpts, PharmaciesArgs, PharmaciesCommand, PharmacyFields};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PharmacyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Record")]
    record_number: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Zone")]
    zone: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Sector")]
    sector: String,
}

impl From<&Pharmacy> for PharmacyRow {
    fn from(p: &Pharmacy) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            record_number: p.record_number.clone(),
            address: p.address.clone(),
            zone: output::or_dash(p.zone_name.as_deref()),
            owner: output::or_dash(p.owner_name.as_deref()),
            hours: format!("{}h", p.opening_hours),
            sector: p.sector_type.to_string(),
        }
    }
}

fn id_text(id: Option<&EntityId>) -> String {
    id.map_or_else(|| "-".to_owned(), ToString::to_string)
}

fn detail(p: &Pharmacy) -> Vec<(&'static str, String)> {
    let location = p
        .location()
        .map_or_else(|| "-".to_owned(), |g| format!("{}, {}", g.lat, g.lng));
    vec![
        ("ID", p.id.to_string()),
        ("Name", p.name.clone()),
        ("Record number", p.record_number.clone()),
        ("Address", p.address.clone()),
        ("Location", location),
        ("Business name", p.business_name.clone()),
        ("NIT", p.nit.clone()),
        ("Opening hours", p.opening_hours.to_string()),
        ("Sector", p.sector_type.to_string()),
        (
            "Zone",
            p.zone_name
                .clone()
                .unwrap_or_else(|| id_text(p.zone_id.as_ref())),
        ),
        (
            "Owner",
            p.owner_name
                .clone()
                .unwrap_or_else(|| id_text(p.owner_id.as_ref())),
        ),
        ("Code", id_text(p.code_id.as_ref())),
        ("User", id_text(p.user_id.as_ref())),
        ("Substances", id_text(p.controlled_substance_id.as_ref())),
        ("Photo", photo_text(p.image.as_deref())),
    ]
}

/// Embedded photos are too long to print; linked ones show their URL.
fn photo_text(image: Option<&str>) -> String {
    match image {
        None => "-".to_owned(),
        Some(url) if is_data_url(url) => "embedded".to_owned(),
        Some(url) => url.to_owned(),
    }
}

fn apply(form: &mut PharmacyForm, fields: &PharmacyFields) -> Result<(), CliError> {
    let pairs = [
        ("name", fields.name.as_ref()),
        ("recordNumber", fields.record_number.as_ref()),
        ("address", fields.address.as_ref()),
        ("latitude", fields.lat.as_ref()),
        ("longitude", fields.lng.as_ref()),
        ("businessName", fields.business_name.as_ref()),
        ("nit", fields.nit.as_ref()),
        ("Zone_id", fields.zone.as_ref()),
        ("Owner_id", fields.owner.as_ref()),
        ("Code_id", fields.code.as_ref()),
        ("User_id", fields.user.as_ref()),
        ("ControlledSubstances_id", fields.substances.as_ref()),
        ("openingHours", fields.hours.as_ref()),
        ("sectorType", fields.sector.as_ref()),
    ];
    for (name, value) in pairs {
        if let Some(value) = value {
            form.set(name, value.as_str()).map_err(util::form_error)?;
        }
    }

    if let Some(ref path) = fields.image {
        form.attach_image(path).map_err(util::form_error)?;
    } else if fields.clear_image {
        form.clear_image().map_err(util::form_error)?;
    }
    Ok(())
}

async fn open_form(
    ctx: &Context,
    id: Option<&EntityId>,
    global: &GlobalOpts,
) -> Result<PharmacyForm, CliError> {
    let pb = util::spinner("Loading zones, owners, codes, substances, and users", global);
    let result = PharmacyForm::open(ctx.console.api(), id).await;
    pb.finish_and_clear();
    Ok(result?)
}

async fn submit(
    mut form: PharmacyForm,
    ctx: &Context,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pb = util::spinner("Saving", global);
    let result = form.submit(ctx.console.api()).await;
    pb.finish_and_clear();
    let outcome = result.map_err(util::form_error)?;
    util::report_outcome(&outcome, global);
    print_one(outcome.record(), global);
    Ok(())
}

fn print_list(rows: &[Pharmacy], global: &GlobalOpts) {
    let out = output::render_list(&global.output, rows, |x| PharmacyRow::from(x), |p| p.id.to_string());
    output::print_output(&out, global.quiet);
}

fn print_one(pharmacy: &Pharmacy, global: &GlobalOpts) {
    let out = output::render_single(&global.output, pharmacy, detail, |p| p.id.to_string());
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &Context,
    args: PharmaciesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PharmaciesCommand::List { name } => {
            let page = util::load_page::<Pharmacy>(ctx, global).await?;
            print_list(&util::page_rows(&page, name.as_deref()), global);
            Ok(())
        }

        PharmaciesCommand::Search { filter } => {
            let rows = search_pharmacies(ctx.console.api(), &filter).await?;
            print_list(&rows, global);
            Ok(())
        }

        PharmaciesCommand::Get { id } => {
            let pharmacy = Pharmacy::fetch(ctx.console.api(), &EntityId::from(id.as_str())).await?;
            print_one(&pharmacy, global);
            Ok(())
        }

        PharmaciesCommand::Create(fields) => {
            let mut form = open_form(ctx, None, global).await?;
            apply(&mut form, &fields)?;
            submit(form, ctx, global).await
        }

        PharmaciesCommand::Update { id, fields } => {
            let id = EntityId::from(id.as_str());
            let mut form = open_form(ctx, Some(&id), global).await?;
            apply(&mut form, &fields)?;
            submit(form, ctx, global).await
        }

        PharmaciesCommand::Delete { id } => {
            util::delete_resource::<Pharmacy>(ctx, &id, global).await
        }
    }
}
