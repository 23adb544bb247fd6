use crate::classifier::{Classification, Classifier, Distribution, Evidence};
use crate::config::ShimConfig;
use crate::error::Result;
use crate::locator::Locator;
use crate::platform::PlatformFamily;
use crate::probe::SystemProbeRunner;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct DetectOutput<'a> {
    path: String,
    platform: PlatformFamily,
    distribution: Distribution,
    login_path_rewritten: bool,
    evidence: &'a [Evidence],
}

pub struct DetectCommand<'a> {
    config: &'a ShimConfig,
}

impl<'a> DetectCommand<'a> {
    pub fn new(config: &'a ShimConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let platform = PlatformFamily::current();
        let path = Locator::new(platform)
            .with_extra_candidates(&self.config.locator.extra_paths)
            .resolve()
            .into_result()?;

        let probes = SystemProbeRunner::new(self.config.probe.timeout());
        log::debug!("Probe timeout: {:?}", probes.timeout());
        let classification = Classifier::new(platform, &probes).classify(&path);

        if json {
            let output = DetectOutput {
                path: path.display().to_string(),
                platform,
                distribution: classification.distribution,
                login_path_rewritten: !classification.distribution.supports_login_path(),
                evidence: &classification.evidence,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_report(&path, platform, &classification);
        }

        Ok(())
    }
}

fn print_report(path: &Path, platform: PlatformFamily, classification: &Classification) {
    let distribution = classification.distribution;
    let mode = if distribution.supports_login_path() {
        "arguments forwarded unchanged".green()
    } else {
        "--login-path rewritten".yellow()
    };

    println!("{:<14}{}", "Executable:", path.display());
    println!("{:<14}{}", "Platform:", platform);
    println!(
        "{:<14}{} ({mode})",
        "Distribution:",
        distribution.to_string().bold()
    );

    if classification.evidence.is_empty() {
        println!("{:<14}{}", "Evidence:", "none".dimmed());
        return;
    }

    println!("Evidence:");
    for item in &classification.evidence {
        println!("  - {}", describe(item));
    }
}

fn describe(evidence: &Evidence) -> String {
    match evidence {
        Evidence::PackageOwner {
            manager,
            package,
            base_name,
            matched,
        } => format!(
            "{manager}: owned by {package} (base name {base_name}, {})",
            if *matched { "MySQL package" } else { "not a MySQL package" }
        ),
        Evidence::PathPattern { pattern } => format!("path matches MySQL location '{pattern}'"),
        Evidence::VersionString { output, matched } => format!(
            "version: '{output}' ({})",
            if *matched { "MySQL" } else { "not MySQL" }
        ),
        Evidence::ProbeFailed { method, reason } => format!("{method}: {reason}"),
    }
}
