//! Visit command - shows what a browser would see for a domain.

use sitebuilder::{domain::DomainError, render::Frame, visit::resolve};

use crate::backend::Profile;
use crate::cli::VisitArgs;
use crate::commands::domains::emit_document;
use crate::output::{OutputFormat, print_json};

/// Run the `visit` command
pub async fn run(
    args: &VisitArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let profile = Profile::open(&args.profile).await?;
    let mut frame = Frame::default();
    let found = profile.instance().visit(&args.domain, &mut frame)?;

    let location = frame.location.as_ref().map(ToString::to_string);
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "domain": found.as_ref().map(|d| &d.domain_name),
            "location": location,
            "notFound": frame.not_found,
            "document": frame.document.as_deref().filter(|_| frame.visible),
        }))?,
        OutputFormat::Human => match frame.document.as_deref().filter(|_| frame.visible) {
            Some(document) => {
                if let Some(location) = &location {
                    eprintln!("Location: {location}");
                }
                emit_document(document, args.output.as_deref()).await?;
            }
            None => {
                return Err(DomainError::NotFound {
                    domain: resolve(&args.domain),
                }
                .into());
            }
        },
    }
    Ok(())
}
