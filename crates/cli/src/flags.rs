use alk_overview::OverviewFormat;
use clap::ValueEnum;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum FormatFlag {
    Yaml,
    Xml,
}

impl FormatFlag {
    pub(crate) const fn as_domain(self) -> OverviewFormat {
        match self {
            FormatFlag::Yaml => OverviewFormat::Yaml,
            FormatFlag::Xml => OverviewFormat::Xml,
        }
    }
}
