use anyhow::Result;

use ava::{Affordance, AvaConfig, VideoSourceResolver};

use super::output::{print_json, print_source};
use crate::OutputFormat;

fn resolver(config: &AvaConfig, origin: Option<&str>) -> Result<VideoSourceResolver> {
    match origin {
        Some(origin) => Ok(VideoSourceResolver::with_origin(origin)),
        None => config.resolver(),
    }
}

pub fn cmd_resolve(
    config: &AvaConfig,
    url: &str,
    origin: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let source = resolver(config, origin)?.resolve(url);
    match format {
        OutputFormat::Json => print_json(&source)?,
        OutputFormat::Text => print_source(&source),
    }
    Ok(())
}

pub fn cmd_embed(config: &AvaConfig, url: &str, title: &str, origin: Option<&str>) -> Result<()> {
    let source = resolver(config, origin)?.resolve(url);
    println!("{}", Affordance::from(&source).to_html(title));
    Ok(())
}
