//! The `core` extension: common RPM metadata fields.

use serde::Deserialize;
use specgen_config::{Namespace, OptionSpec, ResolvedConfig};
use specgen_document::SpecDocument;

use crate::extension::{BoxError, Extension};

const NAMESPACE: &str = "core";

/// Build root used when the configuration does not name one.
pub const DEFAULT_BUILDROOT: &str =
    "%(mktemp -ud %{_tmppath}/%{SOURCE0}-%{version}-%{release}-XXXXXX)";

/// Resolved `[core]` namespace.
#[derive(Debug, Deserialize)]
struct CoreConfig {
    name: String,
    version: String,
    release: i64,
    summary: Option<String>,
    group: Option<String>,
    license: Option<String>,
    url: Option<String>,
    source: Option<String>,
    buildroot: String,
    buildarch: Option<String>,
}

/// Sets `Name`, `Version`, `Release` and `BuildRoot`, the optional
/// descriptive tags when configured, and buildroot cleanup in `%prep` and
/// `%clean`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreExtension;

impl Extension for CoreExtension {
    fn name(&self) -> &str {
        "core"
    }

    fn description(&self) -> &str {
        "Complete the common core RPM metadata fields."
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn namespace(&self) -> Option<Namespace> {
        Some(
            Namespace::new(NAMESPACE, "Common core RPM metadata fields.")
                .option(
                    OptionSpec::string("name", "The name of the RPM file which is generated.")
                        .required(),
                )
                .option(OptionSpec::string("version", "The RPM version to build.").required())
                .option(
                    OptionSpec::integer("release", "The release number for the RPM. Default is 1.")
                        .with_default(1_i64),
                )
                .option(OptionSpec::string("summary", "The short package summary."))
                .option(OptionSpec::string(
                    "group",
                    "The RPM package group in which this package belongs.",
                ))
                .option(OptionSpec::string(
                    "license",
                    "The license under which the package is distributed.",
                ))
                .option(OptionSpec::string("url", "The URL of the package source."))
                .option(OptionSpec::string("source", "The path to the package source."))
                .option(
                    OptionSpec::string("buildroot", "The name of the buildroot directory to use.")
                        .with_default(DEFAULT_BUILDROOT),
                )
                .option(OptionSpec::string("buildarch", "The build architecture to use.")),
        )
    }

    fn generate(&self, config: &ResolvedConfig, mut spec: SpecDocument) -> Result<SpecDocument, BoxError> {
        let core: CoreConfig = config.section(NAMESPACE)?;

        for (option, value) in [("name", &core.name), ("version", &core.version)] {
            if value.trim().is_empty() {
                return Err(format!("core.{option} must not be empty").into());
            }
        }

        let buildroot = present(Some(core.buildroot)).unwrap_or_else(|| DEFAULT_BUILDROOT.to_string());

        spec.set_tag("Name", core.name);
        spec.set_tag("Version", core.version);
        spec.set_tag("Release", format!("{}%{{?dist}}", core.release));
        spec.set_tag("BuildRoot", buildroot);

        let optional = [
            ("BuildArch", core.buildarch),
            ("Summary", core.summary),
            ("Group", core.group),
            ("License", core.license),
            ("Url", core.url),
            ("Source0", core.source),
        ];
        for (tag, value) in optional {
            match present(value) {
                Some(value) => {
                    spec.set_tag(tag, value);
                }
                None => tracing::trace!(tag, "optional tag not configured"),
            }
        }

        spec.append_block("prep", "rm -rf %{buildroot}/*");
        spec.append_block("clean", "rm -rf %{buildroot}");

        Ok(spec)
    }
}

/// Blank strings count as not configured.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
