//! Integrated services
//!
//! One [`ServiceKind`] per add-on that can be attached to a cluster. A kind names the
//! service, validates its spec and knows which questions to ask to build one. Kinds are
//! looked up once, when a command is constructed.

use crate::api::{ActivateIntegratedServiceRequest, Spec, UpdateIntegratedServiceRequest};
use crate::error::CliError;
use crate::lifecycle::SpecError;
use crate::prompt::Prompter;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

pub mod ask;
pub mod commands;
pub mod dns;
pub mod expiry;
pub mod logging;
pub mod monitoring;

pub use commands::{
    check_service_enabled, list_services, validate_request, ActivateWorkflow, ServiceCommands,
    UpdateWorkflow,
};

/// Capability interface of one integrated service kind.
pub trait ServiceKind: Send + Sync {
    /// Name shown to operators, e.g. `Monitoring`.
    fn readable_name(&self) -> &'static str;

    /// Name used in the remote resource path, e.g. `monitoring`.
    fn service_name(&self) -> &'static str;

    fn validate_spec(&self, spec: &Value) -> Result<(), SpecError>;

    fn build_activate_request(
        &self,
        prompter: &dyn Prompter,
    ) -> Result<ActivateIntegratedServiceRequest, CliError>;

    /// Revise `request`, which arrives seeded with the currently persisted spec.
    fn build_update_request(
        &self,
        prompter: &dyn Prompter,
        request: &mut UpdateIntegratedServiceRequest,
    ) -> Result<(), CliError>;
}

/// A service kind whose spec has a typed serde model.
///
/// Implementors get [`ServiceKind`] for free: validation decodes the loose spec into
/// `Spec` and applies [`TypedService::check`]; building asks [`TypedService::ask`].
pub trait TypedService: Send + Sync {
    type Spec: Serialize + DeserializeOwned + Default;

    const READABLE_NAME: &'static str;
    const SERVICE_NAME: &'static str;

    fn check(spec: &Self::Spec) -> Result<(), SpecError>;

    fn ask(&self, prompter: &dyn Prompter, current: Self::Spec) -> Result<Self::Spec, CliError>;
}

impl<T: TypedService> ServiceKind for T {
    fn readable_name(&self) -> &'static str {
        T::READABLE_NAME
    }

    fn service_name(&self) -> &'static str {
        T::SERVICE_NAME
    }

    fn validate_spec(&self, spec: &Value) -> Result<(), SpecError> {
        let typed: T::Spec = serde_json::from_value(spec.clone()).map_err(|e| {
            SpecError::new(format!("{} spec is malformed: {}", T::SERVICE_NAME, e))
        })?;
        T::check(&typed)
    }

    fn build_activate_request(
        &self,
        prompter: &dyn Prompter,
    ) -> Result<ActivateIntegratedServiceRequest, CliError> {
        let spec = self.ask(prompter, T::Spec::default())?;
        Ok(ActivateIntegratedServiceRequest {
            spec: to_spec(&spec)?,
        })
    }

    fn build_update_request(
        &self,
        prompter: &dyn Prompter,
        request: &mut UpdateIntegratedServiceRequest,
    ) -> Result<(), CliError> {
        let current = serde_json::from_value(Value::Object(request.spec.clone()))
            .unwrap_or_else(|e| {
                warn!(
                    service = T::SERVICE_NAME,
                    "Current spec does not decode ({}), starting from defaults", e
                );
                T::Spec::default()
            });
        let known = to_spec(&current)?;
        let answers = to_spec(&self.ask(prompter, current)?)?;
        retract(&mut request.spec, &known, &answers);
        overlay(&mut request.spec, answers);
        Ok(())
    }
}

/// Serialize a typed spec into the free-form payload.
pub fn to_spec<S: Serialize>(spec: &S) -> Result<Spec, CliError> {
    match serde_json::to_value(spec) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CliError::Structural(format!(
            "spec must serialize to an object, got {}",
            other
        ))),
        Err(e) => Err(CliError::Structural(format!("failed to serialize spec: {}", e))),
    }
}

/// Merge `answers` into `base`, keeping keys of `base` the typed model does not know.
pub fn overlay(base: &mut Map<String, Value>, answers: Map<String, Value>) {
    for (key, value) in answers {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => overlay(existing, incoming),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Remove from `base` the keys present in `known` but missing from `answers`.
///
/// `known` is the typed view of `base` before the questions, so only fields the operator
/// cleared are removed; keys the typed model does not know are never touched.
pub fn retract(
    base: &mut Map<String, Value>,
    known: &Map<String, Value>,
    answers: &Map<String, Value>,
) {
    for (key, before) in known {
        let Some(after) = answers.get(key) else {
            base.remove(key);
            continue;
        };
        if let (Value::Object(before), Value::Object(after), Some(Value::Object(existing))) =
            (before, after, base.get_mut(key))
        {
            retract(existing, before, after);
        }
    }
}

static MONITORING: monitoring::MonitoringService = monitoring::MonitoringService;
static LOGGING: logging::LoggingService = logging::LoggingService;
static DNS: dns::DnsService = dns::DnsService;
static EXPIRY: expiry::ExpiryService = expiry::ExpiryService;

/// Every supported service kind.
pub fn registry() -> [&'static dyn ServiceKind; 4] {
    [&MONITORING, &LOGGING, &DNS, &EXPIRY]
}

/// Find a service kind by its service name.
pub fn lookup(service_name: &str) -> Option<&'static dyn ServiceKind> {
    registry()
        .into_iter()
        .find(|kind| kind.service_name() == service_name)
}

/// Reason for a rejected field, prefixed with its path.
pub(crate) fn field_error(path: &str, reason: impl std::fmt::Display) -> SpecError {
    SpecError::new(format!("{}: {}", path, reason))
}
