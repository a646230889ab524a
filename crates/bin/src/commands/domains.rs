//! Domain commands: search, register, list, preview, draft and publish.

use std::path::{Path, PathBuf};

use sitebuilder::{
    domain::Domain,
    editor::{BufferKind, EditorSession},
};

use crate::backend::Profile;
use crate::cli::{DomainArgs, DomainsArgs, EditArgs, PreviewArgs, SearchArgs};
use crate::output::{OutputFormat, print_json, print_table};

fn domain_rows(domains: &[Domain], with_owner: bool) -> Vec<Vec<String>> {
    domains
        .iter()
        .map(|d| {
            let mut row = vec![d.domain_name.clone()];
            if with_owner {
                row.push(d.owner_email.clone());
            }
            row.push(d.created_at.format("%Y-%m-%d %H:%M").to_string());
            row.push(
                d.updated_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".to_string()),
            );
            row
        })
        .collect()
}

/// Write `document` to `output`, or to stdout without one.
pub(crate) async fn emit_document(
    document: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            tokio::fs::write(path, document).await?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}

/// Run the `search` command
pub async fn search(
    args: &SearchArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let session = profile.session()?;
    let suggestions = profile.instance().suggest(&session, &args.query)?;

    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = suggestions
                .iter()
                .map(|s| {
                    let status = if s.available { "Available" } else { "Taken" };
                    vec![s.domain_name.clone(), status.to_string()]
                })
                .collect();
            print_table(&["DOMAIN", "STATUS"], &rows, "No suggestions.");
        }
        OutputFormat::Json => print_json(&suggestions)?,
    }
    Ok(())
}

/// Run the `register` command
pub async fn register(
    args: &DomainArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let session = profile.session()?;
    let domain = profile.instance().register_domain(&session, &args.domain)?;
    profile.save()?;

    match format {
        OutputFormat::Human => println!("Registered {}", domain.domain_name),
        OutputFormat::Json => print_json(&domain)?,
    }
    Ok(())
}

/// Run the `domains` command
pub async fn list(
    args: &DomainsArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let session = profile.session()?;

    let domains = if args.all {
        session.require_user()?;
        if !session.is_admin() {
            return Err("only the administrator can list every domain".into());
        }
        profile.instance().registry().list()?
    } else {
        profile.instance().my_domains(&session)?
    };

    match format {
        OutputFormat::Human => {
            let rows = domain_rows(&domains, args.all);
            let headers: &[&str] = if args.all {
                &["DOMAIN", "OWNER", "CREATED", "PUBLISHED"]
            } else {
                &["DOMAIN", "CREATED", "PUBLISHED"]
            };
            print_table(headers, &rows, "No domains found.");
        }
        OutputFormat::Json => print_json(&domains)?,
    }
    Ok(())
}

/// Run the `preview` command
pub async fn preview(
    args: &PreviewArgs,
    _format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let session = profile.session()?;
    let editor = profile.instance().open_editor(&session, &args.domain)?;
    let document = editor.preview().unwrap_or_default();
    emit_document(&document, args.output.as_deref()).await
}

/// Open the editor for `args.domain` and load the given files into its buffers.
async fn open_with_files(
    profile: &Profile,
    args: &EditArgs,
) -> Result<EditorSession, Box<dyn std::error::Error>> {
    let session = profile.session()?;
    let mut editor = profile.instance().open_editor(&session, &args.domain)?;

    let files: [(BufferKind, &Option<PathBuf>); 3] = [
        (BufferKind::Html, &args.html),
        (BufferKind::Css, &args.css),
        (BufferKind::Js, &args.js),
    ];
    for (kind, path) in files {
        if let Some(path) = path {
            let text = tokio::fs::read_to_string(path).await?;
            editor.set_buffer(kind, text);
        }
    }
    Ok(editor)
}

/// Run the `draft` command
pub async fn draft(
    args: &EditArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let mut editor = open_with_files(&profile, args).await?;
    let draft = editor.autosave()?;
    editor.close();
    profile.save()?;

    match (format, draft) {
        (OutputFormat::Human, Some(draft)) => println!(
            "Draft of {} saved at {}",
            draft.domain,
            draft.saved_at.format("%Y-%m-%d %H:%M:%S")
        ),
        (OutputFormat::Human, None) => println!("Nothing to save"),
        (OutputFormat::Json, draft) => print_json(&draft)?,
    }
    Ok(())
}

/// Run the `publish` command
pub async fn publish(
    args: &EditArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let mut editor = open_with_files(&profile, args).await?;
    let notification = editor.publish()?;
    editor.close();
    profile.save()?;

    match (format, notification) {
        (OutputFormat::Human, Some(notification)) => println!("{}", notification.message),
        (OutputFormat::Human, None) => println!("Nothing to publish"),
        (OutputFormat::Json, notification) => print_json(&notification)?,
    }
    Ok(())
}
