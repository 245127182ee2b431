use crate::{
    request::{Mode, OperationRequest},
    settings::Settings,
    Result,
};

pub mod query;
pub mod update;

pub fn print_json<T: ?Sized + serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The full flag surface of the tool. Trailing positional arguments are
/// the values to search for in field-update mode.
#[derive(Debug, Default, clap::Args)]
pub struct Cmd {
    /// The member field in Orbit to search, and to update when --new is given
    #[arg(long)]
    pub field: Option<String>,

    /// The value that replaces the matched members' field
    #[arg(long)]
    pub new: Option<String>,

    /// Return the member profiles that contain the query string
    #[arg(long)]
    pub query: Option<String>,

    /// With --query, print each matching member's location
    #[arg(long, conflicts_with = "return_company")]
    pub return_location: bool,

    /// With --query, print each matching member's company
    #[arg(long)]
    pub return_company: bool,

    /// The values to search for
    pub search_values: Vec<String>,
}

impl Cmd {
    pub async fn run(&self, settings: &Settings) -> Result {
        let request = OperationRequest::resolve(settings, self)?;
        let client = orbit::client::new(&request.api_key, &request.workspace)?;
        match &request.mode {
            Mode::Query { query, projection } => query::run(&client, query, *projection).await,
            Mode::FieldUpdate {
                field,
                new_value,
                search_values,
            } => update::run(&client, field, new_value.as_deref(), search_values).await,
        }
    }
}
