use crate::{cmd::Cmd, settings::Settings};
use thiserror::Error;

/// The resolved intent of one invocation: credentials plus exactly one
/// operating mode. Constructed only by [`OperationRequest::resolve`], so a
/// request that mixes query and field-update inputs cannot exist.
#[derive(Debug)]
pub struct OperationRequest {
    pub api_key: String,
    pub workspace: String,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Query {
        query: String,
        projection: Option<Projection>,
    },
    FieldUpdate {
        field: String,
        /// Absent means locate and report only, without mutating.
        new_value: Option<String>,
        search_values: Vec<String>,
    },
}

/// Which single member attribute to print in query mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Company,
    Location,
}

impl Projection {
    pub fn from_flags(company: bool, location: bool) -> Option<Self> {
        match (company, location) {
            (true, _) => Some(Self::Company),
            (_, true) => Some(Self::Location),
            _ => None,
        }
    }

    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Location => "location",
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please provide an API key using env var ORBIT_API_KEY")]
    MissingApiKey,
    #[error("please provide your Orbit workspace ID using env var ORBIT_WORKSPACE_ID")]
    MissingWorkspace,
    #[error("please provide the field you wish to scan with --field")]
    MissingField,
    #[error("please provide the values you want to search for after the command line flags")]
    MissingSearchValues,
    #[error("--query is not compatible with --field")]
    QueryWithField,
    #[error("--query is not compatible with --new")]
    QueryWithNewValue,
    #[error("--query is not compatible with arguments after the command line flags")]
    QueryWithSearchValues,
}

/// Every violated rule found while resolving a request, one per line.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
pub struct InvalidRequest(pub Vec<ValidationError>);

impl OperationRequest {
    /// Check every rule and collect all violations before failing; no
    /// network activity happens until a request resolves cleanly.
    pub fn resolve(settings: &Settings, cmd: &Cmd) -> Result<Self, InvalidRequest> {
        let mut violations = Vec::new();

        if settings.api_key.is_empty() {
            violations.push(ValidationError::MissingApiKey);
        }
        if settings.workspace_id.is_empty() {
            violations.push(ValidationError::MissingWorkspace);
        }

        // Flags passed as empty strings count as absent.
        let field = cmd.field.as_deref().filter(|v| !v.is_empty());
        let new_value = cmd.new.as_deref().filter(|v| !v.is_empty());
        let query = cmd.query.as_deref().filter(|v| !v.is_empty());

        let mode = match query {
            None => {
                if field.is_none() {
                    violations.push(ValidationError::MissingField);
                }
                if cmd.search_values.is_empty() {
                    violations.push(ValidationError::MissingSearchValues);
                }
                Mode::FieldUpdate {
                    field: field.unwrap_or_default().to_string(),
                    new_value: new_value.map(str::to_string),
                    search_values: cmd.search_values.clone(),
                }
            }
            Some(query) => {
                if field.is_some() {
                    violations.push(ValidationError::QueryWithField);
                }
                if new_value.is_some() {
                    violations.push(ValidationError::QueryWithNewValue);
                }
                if !cmd.search_values.is_empty() {
                    violations.push(ValidationError::QueryWithSearchValues);
                }
                Mode::Query {
                    query: query.to_string(),
                    projection: Projection::from_flags(cmd.return_company, cmd.return_location),
                }
            }
        };

        if !violations.is_empty() {
            return Err(InvalidRequest(violations));
        }

        Ok(Self {
            api_key: settings.api_key.clone(),
            workspace: settings.workspace_id.clone(),
            mode,
        })
    }
}
