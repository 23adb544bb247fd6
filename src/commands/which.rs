use crate::config::ShimConfig;
use crate::error::Result;
use crate::locator::Locator;
use crate::platform::PlatformFamily;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct WhichOutput<'a> {
    path: String,
    platform: &'a PlatformFamily,
}

pub struct WhichCommand<'a> {
    config: &'a ShimConfig,
}

impl<'a> WhichCommand<'a> {
    pub fn new(config: &'a ShimConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let platform = PlatformFamily::current();
        let path = Locator::new(platform)
            .with_extra_candidates(&self.config.locator.extra_paths)
            .resolve()
            .into_result()?;

        if json {
            output_json(&path, &platform)?;
        } else {
            println!("{}", path.display());
        }

        Ok(())
    }
}

fn output_json(path: &Path, platform: &PlatformFamily) -> Result<()> {
    let output = WhichOutput {
        path: path.display().to_string(),
        platform,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
