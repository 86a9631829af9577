//! DNS: external-dns record management for the cluster.

use super::ask::{ask_choice, ask_list, ask_optional, ask_string, Choice};
use super::{field_error, TypedService};
use crate::error::CliError;
use crate::lifecycle::SpecError;
use crate::prompt::Prompter;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DnsProvider {
    #[default]
    #[serde(rename = "banzaicloud-dns")]
    BanzaiCloud,
    #[serde(rename = "route53")]
    Route53,
    #[serde(rename = "azure")]
    Azure,
    #[serde(rename = "google")]
    Google,
}

impl DnsProvider {
    /// The managed provider authenticates on its own.
    pub fn needs_secret(&self) -> bool {
        !matches!(self, DnsProvider::BanzaiCloud)
    }
}

impl Choice for DnsProvider {
    const ALL: &'static [Self] = &[
        DnsProvider::BanzaiCloud,
        DnsProvider::Route53,
        DnsProvider::Azure,
        DnsProvider::Google,
    ];

    fn label(&self) -> &'static str {
        match self {
            DnsProvider::BanzaiCloud => "Banzai Cloud DNS",
            DnsProvider::Route53 => "Amazon Route 53",
            DnsProvider::Azure => "Azure DNS",
            DnsProvider::Google => "Google Cloud DNS",
        }
    }
}

/// Kubernetes resources external-dns watches for hostnames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsSource {
    Service,
    Ingress,
    Crd,
}

impl DnsSource {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "service" => Some(DnsSource::Service),
            "ingress" => Some(DnsSource::Ingress),
            "crd" => Some(DnsSource::Crd),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            DnsSource::Service => "service",
            DnsSource::Ingress => "ingress",
            DnsSource::Crd => "crd",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsProviderSpec {
    pub name: DnsProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_id: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDnsSpec {
    #[serde(default)]
    pub provider: DnsProviderSpec,
    #[serde(default)]
    pub domain_filters: Vec<String>,
    #[serde(default)]
    pub sources: Vec<DnsSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txt_owner_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsSpec {
    #[serde(default)]
    pub cluster_domain: String,
    #[serde(default)]
    pub external_dns: ExternalDnsSpec,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DnsService;

impl TypedService for DnsService {
    type Spec = DnsSpec;

    const READABLE_NAME: &'static str = "DNS";
    const SERVICE_NAME: &'static str = "dns";

    fn check(spec: &DnsSpec) -> Result<(), SpecError> {
        let domain = &spec.cluster_domain;
        if domain.starts_with('.') || domain.ends_with('.') {
            return Err(field_error("clusterDomain", "must not start or end with \".\""));
        }

        let external = &spec.external_dns;
        if external.domain_filters.is_empty() {
            return Err(field_error("externalDns.domainFilters", "at least one domain is required"));
        }
        if external.domain_filters.iter().any(|f| f.trim().is_empty()) {
            return Err(field_error("externalDns.domainFilters", "domains must not be empty"));
        }

        let provider = &external.provider;
        let has_secret = provider
            .secret_id
            .as_deref()
            .map_or(false, |id| !id.trim().is_empty());
        if provider.name.needs_secret() && !has_secret {
            return Err(field_error(
                "externalDns.provider.secretId",
                format!("is required for provider {}", provider.name.label()),
            ));
        }
        Ok(())
    }

    fn ask(&self, prompter: &dyn Prompter, mut spec: DnsSpec) -> Result<DnsSpec, CliError> {
        spec.cluster_domain = ask_string(prompter, "Cluster domain", &spec.cluster_domain)?;

        let external = &mut spec.external_dns;
        external.domain_filters = ask_list(
            prompter,
            "Domains to manage (comma separated)",
            &external.domain_filters,
        )?;

        let provider = &mut external.provider;
        let previous = provider.name;
        provider.name = ask_choice(prompter, "DNS provider", provider.name)?;
        if provider.name != previous {
            // Options are provider specific.
            provider.options.clear();
        }
        if provider.name.needs_secret() {
            provider.secret_id = ask_optional(
                prompter,
                &format!("{} secret ID", provider.name.label()),
                provider.secret_id.as_deref(),
            )?;
        } else {
            provider.secret_id = None;
        }

        let current: Vec<String> = external.sources.iter().map(|s| s.as_str().to_string()).collect();
        loop {
            let answers = ask_list(prompter, "Sources to watch (service, ingress, crd)", &current)?;
            let parsed: Option<Vec<DnsSource>> = answers.iter().map(|s| DnsSource::parse(s)).collect();
            match parsed {
                Some(sources) => {
                    external.sources = sources;
                    break;
                }
                None => eprintln!("sources must be any of: service, ingress, crd"),
            }
        }

        Ok(spec)
    }
}
