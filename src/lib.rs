//! Azure Cognitive Search connector for UI-agnostic search state.
//!
//! The library translates a generic search request (term, pagination, sort,
//! selected filters) into one provider query, executes it over REST, and
//! normalizes the response back into the generic result shape, including
//! the autocomplete and suggestion sub-protocols. The `azsc` binary is a
//! thin demo consumer.

pub mod config;
pub mod connector;
pub mod filter;
pub mod model;
pub mod provider;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use config::ConnectorSettings;
use connector::SearchConnector;
use model::{
    AutocompleteConfig, AutocompleteResultsConfig, AutocompleteSuggestionsConfig, Direction,
    FieldOptions, FilterClause, QueryConfig, RequestState,
};
use std::collections::BTreeMap;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "azsc",
    version,
    about = "Query an Azure Cognitive Search index through the connector"
)]
pub struct Cli {
    /// Service endpoint, e.g. https://myservice.search.windows.net
    #[arg(long, env = "AZS_ENDPOINT", global = true, default_value = "")]
    pub endpoint: String,

    /// Query API key for the service
    #[arg(
        long,
        env = "AZS_QUERY_KEY",
        hide_env_values = true,
        global = true,
        default_value = ""
    )]
    pub api_key: String,

    /// Index to query
    #[arg(long, env = "AZS_INDEX", global = true, default_value = "")]
    pub index: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a search and print the normalized response state
    Search {
        /// Free-text search term
        term: Option<String>,

        /// 1-based page number
        #[arg(long)]
        page: Option<u32>,

        /// Results per page
        #[arg(long)]
        per_page: Option<u32>,

        /// Sort as `field:asc` or `field:desc`
        #[arg(long)]
        sort: Option<String>,

        /// Filter clause as `field=value`; repeatable
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Field to facet on; repeatable
        #[arg(long = "facet")]
        facets: Vec<String>,

        /// Restrict full-text matching to this field; repeatable
        #[arg(long = "search-field")]
        search_fields: Vec<String>,

        /// Restrict the returned projection to this field; repeatable
        #[arg(long = "select")]
        select: Vec<String>,
    },
    /// Run both autocomplete branches and print the result
    Autocomplete {
        term: String,

        /// Suggester name (the provider-side default is `sg`)
        #[arg(long)]
        suggester: Option<String>,

        /// Completion count limit
        #[arg(long)]
        top: Option<u32>,
    },
    /// Fetch one document by id
    Get { id: String },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = ConnectorSettings::new(cli.endpoint, cli.api_key, cli.index);
    let connector =
        SearchConnector::from_settings(settings).context("connector construction failed")?;

    match cli.command {
        Commands::Search {
            term,
            page,
            per_page,
            sort,
            filters,
            facets,
            search_fields,
            select,
        } => {
            let (sort_field, sort_direction) = match sort {
                Some(raw) => {
                    let (field, direction) = parse_sort(&raw)?;
                    (Some(field), Some(direction))
                }
                None => (None, None),
            };
            let state = RequestState {
                current: page,
                filters: parse_filters(&filters)?,
                results_per_page: per_page,
                search_term: term,
                sort_direction,
                sort_field,
            };
            let config = QueryConfig {
                search_fields: field_set(search_fields),
                result_fields: field_set(select),
                facets: field_set(facets),
            };
            let response = connector.on_search(&state, &config).await?;
            print_json(&response)
        }
        Commands::Autocomplete {
            term,
            suggester,
            top,
        } => {
            let state = RequestState {
                search_term: Some(term),
                ..RequestState::default()
            };
            let config = AutocompleteConfig {
                results: AutocompleteResultsConfig {
                    results_per_page: top,
                    suggester: suggester.clone(),
                    ..AutocompleteResultsConfig::default()
                },
                suggestions: AutocompleteSuggestionsConfig {
                    suggester,
                    ..AutocompleteSuggestionsConfig::default()
                },
            };
            let response = connector.on_autocomplete(&state, &config).await;
            print_json(&response)
        }
        Commands::Get { id } => match connector.get_result(&id).await? {
            Some(document) => print_json(&document),
            None => {
                println!("null");
                Ok(())
            }
        },
    }
}

fn field_set(fields: Vec<String>) -> BTreeMap<String, FieldOptions> {
    fields
        .into_iter()
        .map(|field| (field, FieldOptions::default()))
        .collect()
}

fn parse_sort(raw: &str) -> Result<(String, Direction)> {
    let Some((field, direction)) = raw.rsplit_once(':') else {
        bail!("sort must look like `field:asc` or `field:desc`, got `{raw}`");
    };
    let direction = match direction {
        "asc" => Direction::Asc,
        "desc" => Direction::Desc,
        other => bail!("unknown sort direction `{other}`"),
    };
    Ok((field.to_owned(), direction))
}

fn parse_filters(raw: &[String]) -> Result<Option<Vec<FilterClause>>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let mut clauses = Vec::with_capacity(raw.len());
    for item in raw {
        let Some((field, value)) = item.split_once('=') else {
            bail!("filter must look like `field=value`, got `{item}`");
        };
        clauses.push(FilterClause::single(field, value));
    }
    Ok(Some(clauses))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
