//! Record listing and editing commands.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use inquire::{Confirm, Text};
use siteadmin_lib::AdminClient;
use siteadmin_lib::Record;
use siteadmin_lib::Resource;
use siteadmin_lib::api::{ToggleStrategy, toggle_flags, toggle_strategy};
use siteadmin_lib::error::{Error, ValidationErrors};
use siteadmin_lib::form::{FieldKind, FormState, schema_for};
use siteadmin_lib::model::Status;
use siteadmin_lib::table::{PageSize, SortDirection, TableView};

use super::{parse_assignment, parse_file_assignment, parse_page_size};
use crate::columns::{columns_for, empty_message};
use crate::render;
use crate::session::Session;

/// Form field that links a gallery image to its gallery entry.
const PARENT_FIELD: &str = "projectId";

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Resource to list (e.g. projects, careers, contact-queries)
    pub resource: Resource,

    /// Parent record for nested resources (gallery-images)
    #[arg(long)]
    pub parent: Option<String>,

    /// Only show records where any field contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Column key to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (5, 10, 25 or 50)
    #[arg(long, value_parser = parse_page_size)]
    pub page_size: Option<PageSize>,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    pub resource: Resource,
    pub id: String,
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    pub resource: Resource,

    /// Parent record for nested resources (gallery-images)
    #[arg(long)]
    pub parent: Option<String>,

    /// Field value; list fields take comma-separated entries
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub values: Vec<(String, String)>,

    /// File to upload; repeat for multi-file fields
    #[arg(long = "file", value_name = "KEY=PATH", value_parser = parse_file_assignment)]
    pub files: Vec<(String, PathBuf)>,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    pub resource: Resource,
    pub id: String,

    /// Field value; list fields take comma-separated entries
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub values: Vec<(String, String)>,

    /// Replacement file; repeat for multi-file fields
    #[arg(long = "file", value_name = "KEY=PATH", value_parser = parse_file_assignment)]
    pub files: Vec<(String, PathBuf)>,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    pub resource: Resource,
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct ToggleArgs {
    pub resource: Resource,
    pub id: String,

    /// Flag to flip (isActive, showOnHomePage, active, isThumbnail)
    pub flag: String,
}

/// Fetches the records of `resource`, scoped to `parent` where required.
pub(crate) async fn fetch(
    client: &AdminClient,
    resource: Resource,
    parent: Option<&str>,
) -> Result<Vec<Record>> {
    let records = match parent {
        Some(parent) => client.list_under(resource, parent).await?,
        None => client.list(resource).await?,
    };
    log::debug!("Fetched {} {} records", records.len(), resource);
    Ok(records)
}

pub async fn run_list(session: &Session, args: ListArgs) -> Result<()> {
    let client = session.client().await?;
    let records = fetch(&client, args.resource, args.parent.as_deref()).await?;
    let page_size = match args.page_size {
        Some(size) => size,
        None => session.settings().page_size().await?,
    };

    let mut view = TableView::new(&records, columns_for(args.resource))
        .with_page_size(page_size)
        .with_empty_message(empty_message(args.resource));
    if let Some(term) = args.search {
        view.set_search_term(term);
    }
    if let Some(key) = &args.sort {
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        view.set_sort_direction(key, direction);
    }
    view.set_page(args.page.saturating_sub(1));

    println!("{}", args.resource.label());
    println!("{}", render::table(&view.render()));
    Ok(())
}

pub async fn run_show(session: &Session, args: ShowArgs) -> Result<()> {
    let client = session.client().await?;
    let record = client.retrieve(args.resource, &args.id).await?;
    print!("{}", render::record(&record));
    Ok(())
}

pub async fn run_create(session: &Session, args: CreateArgs) -> Result<()> {
    let resource = args.resource;
    let schema = schema_for(resource)
        .with_context(|| format!("{} cannot be created from the console", resource.label()))?;
    let mut form = FormState::create(schema);

    let parent = match (&args.parent, resource.requires_parent()) {
        (Some(parent), true) => {
            form.set(PARENT_FIELD, parent.as_str())?;
            Some(parent.as_str())
        }
        (None, true) => bail!("{} are created under a parent; pass --parent ID", resource.label()),
        (_, false) => None,
    };

    apply_inputs(&mut form, &args.values, &args.files)?;
    prompt_for_invalid(&mut form)?;
    let payload = form.into_payload().map_err(describe)?;

    let client = session.client().await?;
    let created = match parent {
        Some(parent) => client.create_under(resource, parent, payload).await?,
        None => client.create(resource, payload).await?,
    };

    match created.as_ref().and_then(Record::id) {
        Some(id) => println!("Created {} {}", resource, id),
        None => println!("Created {}", resource),
    }
    Ok(())
}

pub async fn run_edit(session: &Session, args: EditArgs) -> Result<()> {
    let resource = args.resource;
    let schema = schema_for(resource)
        .with_context(|| format!("{} cannot be edited from the console", resource.label()))?;
    if !resource.has_record_endpoint() {
        bail!(
            "{} cannot be edited as a whole; use `caption`, `priority` or `toggle`",
            resource.label()
        );
    }
    if args.values.is_empty() && args.files.is_empty() {
        bail!("Nothing to change; pass --set KEY=VALUE or --file KEY=PATH");
    }

    let client = session.client().await?;
    let current = client.retrieve(resource, &args.id).await?;
    let mut form = FormState::edit(schema, &args.id, &current);

    apply_inputs(&mut form, &args.values, &args.files)?;
    prompt_for_invalid(&mut form)?;
    let payload = form.into_payload().map_err(describe)?;

    client.update(resource, &args.id, payload).await?;
    println!("Updated {} {}", resource, args.id);
    Ok(())
}

pub async fn run_delete(session: &Session, args: DeleteArgs) -> Result<()> {
    if args.resource.is_read_only() {
        bail!("{} are read-only", args.resource.label());
    }

    if !args.yes {
        let confirmed = Confirm::new(&format!(
            "Delete {} {}? This cannot be undone.",
            args.resource, args.id
        ))
        .with_default(false)
        .prompt()
        .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    let client = session.client().await?;
    client.delete(args.resource, &args.id).await?;
    println!("Deleted {} {}", args.resource, args.id);
    Ok(())
}

pub async fn run_toggle(session: &Session, args: ToggleArgs) -> Result<()> {
    let strategy = toggle_strategy(args.resource, &args.id, &args.flag).map_err(|e| {
        let flags = toggle_flags(args.resource);
        if flags.is_empty() {
            anyhow!("{} has no toggleable flags", args.resource.label())
        } else {
            anyhow!("{} (available: {})", e, flags.join(", "))
        }
    })?;

    let client = session.client().await?;
    // Dedicated endpoints flip server-side; the rest need the current value
    let record = match strategy {
        ToggleStrategy::Endpoint { .. } => Record::with_id(args.id.as_str()),
        _ => client.retrieve(args.resource, &args.id).await?,
    };

    let updated = client.toggle(args.resource, &record, &args.flag).await?;
    match updated.as_ref().map(|r| r.get_bool(&args.flag)) {
        Some(Ok(Some(value))) => println!(
            "{} {}: {} is now {}",
            args.resource,
            args.id,
            args.flag,
            Status::from_flag(value)
        ),
        _ => println!("Toggled {} on {} {}", args.flag, args.resource, args.id),
    }
    Ok(())
}

/// Applies `--set` and `--file` inputs to a form.
pub(crate) fn apply_inputs(
    form: &mut FormState,
    values: &[(String, String)],
    files: &[(String, PathBuf)],
) -> Result<()> {
    for (key, value) in values {
        form.set(key, value.as_str())?;
    }
    for (key, path) in files {
        if !path.is_file() {
            bail!("{}: no such file {}", key, path.display());
        }
        form.attach(key, path.clone())?;
    }
    Ok(())
}

/// Asks for each field that fails validation when attached to a terminal.
fn prompt_for_invalid(form: &mut FormState) -> Result<()> {
    if !std::io::stdin().is_terminal() || form.validate().is_ok() {
        return Ok(());
    }

    let invalid: Vec<(String, String)> = form
        .errors()
        .iter()
        .map(|e| (e.field.clone(), e.message.clone()))
        .collect();

    for (name, message) in invalid {
        let Some(spec) = form.schema().get(&name).cloned() else {
            continue;
        };
        let prompt = if spec.kind.is_file() {
            format!("{} (file path):", spec.label)
        } else {
            format!("{}:", spec.label)
        };
        let help = if spec.kind.is_list() {
            format!("{} Separate entries with commas.", message)
        } else {
            message
        };

        let answer = Text::new(&prompt)
            .with_help_message(&help)
            .prompt()
            .context("Failed to read input")?;

        match spec.kind {
            FieldKind::File | FieldKind::Files => {
                for path in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                    form.attach(spec.name, path)?;
                }
            }
            _ => form.set(spec.name, answer)?,
        }
    }
    Ok(())
}

/// Spells out every failing field instead of the first one.
fn describe(error: Error) -> anyhow::Error {
    match error {
        Error::Validation(errors) => anyhow!(validation_report(&errors)),
        other => other.into(),
    }
}

fn validation_report(errors: &ValidationErrors) -> String {
    let mut report = String::from("The form has errors:");
    for error in errors.iter() {
        report.push_str(&format!("\n  {}: {}", error.field, error.message));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteadmin_lib::api::Payload;
    use siteadmin_lib::form::FieldValue;

    #[tokio::test]
    async fn test_edit_gallery_image_points_to_image_commands() {
        let dir = tempfile::tempdir().unwrap();
        let settings = crate::settings::SettingsProvider::open(&dir.path().join("settings.db"))
            .await
            .unwrap();
        let session = Session::new(settings, None, None);
        let args = EditArgs {
            resource: Resource::GalleryImages,
            id: "i1".to_string(),
            values: vec![("caption".to_string(), "Lobby".to_string())],
            files: Vec::new(),
        };

        let err = run_edit(&session, args).await.unwrap_err();
        assert!(err.to_string().contains("use `caption`, `priority` or `toggle`"));
    }

    #[test]
    fn test_apply_inputs_sets_values() {
        let mut form = FormState::create(schema_for(Resource::Careers).unwrap());
        let values = vec![
            ("role".to_string(), "Engineer".to_string()),
            ("position".to_string(), "Senior".to_string()),
        ];

        apply_inputs(&mut form, &values, &[]).unwrap();
        assert_eq!(
            form.value("role"),
            Some(&FieldValue::Text("Engineer".to_string()))
        );
    }

    #[test]
    fn test_apply_inputs_rejects_unknown_field() {
        let mut form = FormState::create(schema_for(Resource::Careers).unwrap());
        let values = vec![("salary".to_string(), "1".to_string())];
        assert!(apply_inputs(&mut form, &values, &[]).is_err());
    }

    #[test]
    fn test_apply_inputs_requires_existing_file() {
        let mut form = FormState::create(schema_for(Resource::Awards).unwrap());
        let files = vec![("image".to_string(), PathBuf::from("/nonexistent/award.png"))];
        let err = apply_inputs(&mut form, &[], &files).unwrap_err();
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_apply_inputs_attaches_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("award.png");
        std::fs::write(&path, b"png").unwrap();

        let mut form = FormState::create(schema_for(Resource::Awards).unwrap());
        apply_inputs(&mut form, &[], &[("image".to_string(), path.clone())]).unwrap();
        assert_eq!(form.value("image"), Some(&FieldValue::Files(vec![path])));
    }

    #[test]
    fn test_validation_report_lists_every_field() {
        let form = FormState::create(schema_for(Resource::Careers).unwrap());
        let err = describe(form.into_payload().unwrap_err()).to_string();
        assert!(err.starts_with("The form has errors:"));
        assert!(err.contains("role: Please add a role."));
        assert!(err.contains("position: Please add a position."));
    }

    #[test]
    fn test_json_payload_for_careers() {
        let mut form = FormState::create(schema_for(Resource::Careers).unwrap());
        let values: Vec<(String, String)> = [
            ("role", "Engineer"),
            ("position", "Senior"),
            ("experience", "5 years"),
            ("location", "Pune"),
            ("description", "Site supervision"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        apply_inputs(&mut form, &values, &[]).unwrap();

        let payload = form.into_payload();
        assert!(matches!(payload, Ok(Payload::Json(_))), "{:?}", payload.err());
    }
}
