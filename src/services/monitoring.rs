//! Monitoring: Grafana, Prometheus, Alertmanager and Pushgateway.

use super::ask::{ask_bool, ask_choice, ask_number, ask_optional, ask_string, Choice};
use super::{field_error, TypedService};
use crate::error::CliError;
use crate::lifecycle::SpecError;
use crate::prompt::Prompter;
use serde::{Deserialize, Serialize};

/// Component that may be exposed through an ingress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngressType {
    Grafana,
    Prometheus,
    Alertmanager,
    Pushgateway,
}

impl IngressType {
    pub const ALL: [IngressType; 4] = [
        IngressType::Grafana,
        IngressType::Prometheus,
        IngressType::Alertmanager,
        IngressType::Pushgateway,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IngressType::Grafana => "Grafana",
            IngressType::Prometheus => "Prometheus",
            IngressType::Alertmanager => "Alertmanager",
            IngressType::Pushgateway => "Pushgateway",
        }
    }

    /// Default ingress path of the component.
    pub fn default_path(&self) -> &'static str {
        match self {
            IngressType::Grafana => "/grafana",
            IngressType::Prometheus => "/prometheus",
            IngressType::Alertmanager => "/alertmanager",
            IngressType::Pushgateway => "/pushgateway",
        }
    }

    /// Kind of secret protecting the ingress.
    pub fn secret_type(&self) -> SecretType {
        match self {
            IngressType::Grafana => SecretType::Password,
            _ => SecretType::Htpasswd,
        }
    }
}

/// Secret kinds referenced by a monitoring spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretType {
    Password,
    Htpasswd,
    Slack,
    PagerDuty,
}

impl SecretType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretType::Password => "password",
            SecretType::Htpasswd => "htpasswd",
            SecretType::Slack => "slack",
            SecretType::PagerDuty => "pagerduty",
        }
    }
}

/// Alertmanager notification provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertmanagerProvider {
    Slack,
    PagerDuty,
}

impl AlertmanagerProvider {
    /// Key of the provider in the spec.
    pub fn key(&self) -> &'static str {
        match self {
            AlertmanagerProvider::Slack => "slack",
            AlertmanagerProvider::PagerDuty => "pagerDuty",
        }
    }

    pub fn secret_type(&self) -> SecretType {
        match self {
            AlertmanagerProvider::Slack => SecretType::Slack,
            AlertmanagerProvider::PagerDuty => SecretType::PagerDuty,
        }
    }
}

impl Choice for AlertmanagerProvider {
    const ALL: &'static [Self] = &[AlertmanagerProvider::Slack, AlertmanagerProvider::PagerDuty];

    fn label(&self) -> &'static str {
        match self {
            AlertmanagerProvider::Slack => "Slack",
            AlertmanagerProvider::PagerDuty => "PagerDuty",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagerDutyIntegration {
    #[default]
    #[serde(rename = "prometheus")]
    Prometheus,
    #[serde(rename = "eventsApiV2")]
    EventsApiV2,
}

impl Choice for PagerDutyIntegration {
    const ALL: &'static [Self] = &[PagerDutyIntegration::Prometheus, PagerDutyIntegration::EventsApiV2];

    fn label(&self) -> &'static str {
        match self {
            PagerDutyIntegration::Prometheus => "Prometheus",
            PagerDutyIntegration::EventsApiV2 => "Events API V2",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_id: Option<String>,
    #[serde(default)]
    pub ingress: IngressSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSpec {
    /// Volume size in GiB
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub retention: String,
}

impl Default for StorageSpec {
    fn default() -> Self {
        Self {
            size: 100,
            retention: "10d".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrafanaSpec {
    #[serde(flatten)]
    pub component: ComponentSpec,
    #[serde(default)]
    pub dashboards: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusSpec {
    #[serde(flatten)]
    pub component: ComponentSpec,
    #[serde(default)]
    pub storage: StorageSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackSpec {
    #[serde(default)]
    pub secret_id: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub send_resolved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerDutySpec {
    #[serde(default)]
    pub secret_id: String,
    #[serde(default)]
    pub integration_type: PagerDutyIntegration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub send_resolved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationProviders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<SlackSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pager_duty: Option<PagerDutySpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertmanagerSpec {
    #[serde(flatten)]
    pub component: ComponentSpec,
    #[serde(default)]
    pub provider: NotificationProviders,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSpec {
    #[serde(default)]
    pub grafana: GrafanaSpec,
    #[serde(default)]
    pub prometheus: PrometheusSpec,
    #[serde(default)]
    pub alertmanager: AlertmanagerSpec,
    #[serde(default)]
    pub pushgateway: ComponentSpec,
}

impl MonitoringSpec {
    fn component(&self, kind: IngressType) -> &ComponentSpec {
        match kind {
            IngressType::Grafana => &self.grafana.component,
            IngressType::Prometheus => &self.prometheus.component,
            IngressType::Alertmanager => &self.alertmanager.component,
            IngressType::Pushgateway => &self.pushgateway,
        }
    }

    fn component_mut(&mut self, kind: IngressType) -> &mut ComponentSpec {
        match kind {
            IngressType::Grafana => &mut self.grafana.component,
            IngressType::Prometheus => &mut self.prometheus.component,
            IngressType::Alertmanager => &mut self.alertmanager.component,
            IngressType::Pushgateway => &mut self.pushgateway,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MonitoringService;

impl TypedService for MonitoringService {
    type Spec = MonitoringSpec;

    const READABLE_NAME: &'static str = "Monitoring";
    const SERVICE_NAME: &'static str = "monitoring";

    fn check(spec: &MonitoringSpec) -> Result<(), SpecError> {
        for kind in IngressType::ALL {
            let component = spec.component(kind);
            if !component.enabled || !component.ingress.enabled {
                continue;
            }
            if !component.ingress.path.starts_with('/') {
                return Err(field_error(
                    &format!("{}.ingress.path", kind.name().to_lowercase()),
                    "must start with \"/\"",
                ));
            }
        }

        if spec.prometheus.component.enabled {
            let storage = &spec.prometheus.storage;
            if storage.size == 0 {
                return Err(field_error("prometheus.storage.size", "must be greater than 0"));
            }
            if !is_duration(&storage.retention) {
                return Err(field_error(
                    "prometheus.storage.retention",
                    format!("{:?} is not a duration like 10d", storage.retention),
                ));
            }
        }

        let provider = &spec.alertmanager.provider;
        if let Some(slack) = &provider.slack {
            if slack.secret_id.trim().is_empty() {
                return Err(field_error("alertmanager.provider.slack.secretId", "must not be empty"));
            }
            if slack.channel.trim().is_empty() {
                return Err(field_error("alertmanager.provider.slack.channel", "must not be empty"));
            }
        }
        if let Some(pager_duty) = &provider.pager_duty {
            if pager_duty.secret_id.trim().is_empty() {
                return Err(field_error(
                    "alertmanager.provider.pagerDuty.secretId",
                    "must not be empty",
                ));
            }
            if let Some(url) = &pager_duty.url {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(field_error(
                        "alertmanager.provider.pagerDuty.url",
                        "must be an http(s) URL",
                    ));
                }
            }
        }

        Ok(())
    }

    fn ask(&self, prompter: &dyn Prompter, mut spec: MonitoringSpec) -> Result<MonitoringSpec, CliError> {
        for kind in IngressType::ALL {
            ask_component(prompter, kind, spec.component_mut(kind))?;
            if !spec.component(kind).enabled {
                continue;
            }
            match kind {
                IngressType::Grafana => {
                    spec.grafana.dashboards =
                        ask_bool(prompter, "Install default Grafana dashboards?", spec.grafana.dashboards)?;
                }
                IngressType::Prometheus => {
                    let storage = &mut spec.prometheus.storage;
                    storage.size = ask_number(prompter, "Prometheus storage size (GiB)", storage.size)?;
                    storage.retention =
                        ask_string(prompter, "Prometheus retention (e.g. 10d)", &storage.retention)?;
                }
                IngressType::Alertmanager => {
                    ask_notification_provider(prompter, &mut spec.alertmanager.provider)?;
                }
                IngressType::Pushgateway => {}
            }
        }
        Ok(spec)
    }
}

fn ask_component(
    prompter: &dyn Prompter,
    kind: IngressType,
    component: &mut ComponentSpec,
) -> Result<(), CliError> {
    component.enabled = ask_bool(prompter, &format!("Enable {}?", kind.name()), component.enabled)?;
    if !component.enabled {
        return Ok(());
    }

    let ingress = &mut component.ingress;
    ingress.enabled = ask_bool(
        prompter,
        &format!("Expose {} through an ingress?", kind.name()),
        ingress.enabled,
    )?;
    if !ingress.enabled {
        return Ok(());
    }

    ingress.domain = ask_optional(
        prompter,
        &format!("{} ingress domain (empty for any)", kind.name()),
        ingress.domain.as_deref(),
    )?;
    let path = if ingress.path.is_empty() {
        kind.default_path()
    } else {
        ingress.path.as_str()
    };
    ingress.path = ask_string(prompter, &format!("{} ingress path", kind.name()), path)?;
    component.secret_id = ask_optional(
        prompter,
        &format!(
            "{} secret ID ({} type, empty to generate)",
            kind.name(),
            kind.secret_type().as_str()
        ),
        component.secret_id.as_deref(),
    )?;
    Ok(())
}

fn ask_notification_provider(
    prompter: &dyn Prompter,
    providers: &mut NotificationProviders,
) -> Result<(), CliError> {
    if !ask_bool(
        prompter,
        "Configure an Alertmanager notification provider?",
        providers.slack.is_some() || providers.pager_duty.is_some(),
    )? {
        return Ok(());
    }

    let current = if providers.pager_duty.is_some() && providers.slack.is_none() {
        AlertmanagerProvider::PagerDuty
    } else {
        AlertmanagerProvider::Slack
    };
    let provider = ask_choice(prompter, "Notification provider", current)?;
    let secret_message = format!(
        "{} secret ID ({} type)",
        provider.label(),
        provider.secret_type().as_str()
    );

    match provider {
        AlertmanagerProvider::Slack => {
            let mut slack = providers.slack.take().unwrap_or_default();
            slack.secret_id = ask_string(prompter, &secret_message, &slack.secret_id)?;
            slack.channel = ask_string(prompter, "Slack channel", &slack.channel)?;
            slack.send_resolved = ask_bool(prompter, "Send resolved alerts?", slack.send_resolved)?;
            providers.slack = Some(slack);
        }
        AlertmanagerProvider::PagerDuty => {
            let mut pager_duty = providers.pager_duty.take().unwrap_or_default();
            pager_duty.secret_id = ask_string(prompter, &secret_message, &pager_duty.secret_id)?;
            pager_duty.integration_type =
                ask_choice(prompter, "PagerDuty integration type", pager_duty.integration_type)?;
            pager_duty.url = ask_optional(prompter, "PagerDuty URL (optional)", pager_duty.url.as_deref())?;
            pager_duty.send_resolved =
                ask_bool(prompter, "Send resolved alerts?", pager_duty.send_resolved)?;
            providers.pager_duty = Some(pager_duty);
        }
    }
    Ok(())
}

/// Prometheus style duration: digits followed by one unit, e.g. `10d`.
fn is_duration(value: &str) -> bool {
    let Some(unit) = value.chars().last() else {
        return false;
    };
    let digits = &value[..value.len() - unit.len_utf8()];
    matches!(unit, 's' | 'm' | 'h' | 'd' | 'w' | 'y')
        && !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
}
