//! `carreview entities`: the entity universe and optional query routing

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::cli::types::EntitiesArgs;
use crate::domain::models::Config;

/// How one query is routed
#[derive(Debug, Serialize)]
pub struct RouteOutput {
    /// The query as given
    pub query: String,
    /// Entities found in the query
    pub hits: Vec<String>,
    /// Whether the candidate rows are a strict subset
    pub restricted: bool,
    /// Number of candidate rows
    pub candidates: usize,
}

/// Entity universe listing
#[derive(Debug, Serialize)]
pub struct EntitiesOutput {
    /// Rows in the loaded index
    pub total_rows: usize,
    /// Entities in sorted order
    pub entities: Vec<String>,
    /// Routing of `--query`, when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteOutput>,
}

impl CommandOutput for EntitiesOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "{} entities over {} chunks:",
            self.entities.len(),
            self.total_rows
        )];
        lines.extend(self.entities.iter().map(|e| format!("  {e}")));

        if let Some(route) = &self.route {
            lines.push(String::new());
            if route.hits.is_empty() {
                lines.push(format!("Query \"{}\" mentions no known entity", route.query));
            } else {
                lines.push(format!(
                    "Query \"{}\" mentions: {}",
                    route.query,
                    route.hits.join(", ")
                ));
            }
            lines.push(if route.restricted {
                format!("Search restricted to {} of {} chunks", route.candidates, self.total_rows)
            } else {
                format!("Search covers all {} chunks", self.total_rows)
            });
        }

        lines.join("\n")
    }
}

/// Handle the entities command
pub fn execute(args: EntitiesArgs, config: &Config, json: bool) -> Result<()> {
    let service = super::open_service(config)?;
    let total_rows = service.snapshot().len();

    let route = args.query.map(|query| {
        let plan = service.plan(&query);
        RouteOutput {
            restricted: !plan.candidates.is_unrestricted(),
            candidates: plan.candidates.len(total_rows),
            hits: plan.hits,
            query,
        }
    });

    output(
        &EntitiesOutput {
            total_rows,
            entities: service.entities().into_iter().collect(),
            route,
        },
        json,
    );
    Ok(())
}
