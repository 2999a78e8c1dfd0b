//! The single writer of the dashboard's [`ViewState`].
//!
//! Every submission bumps a generation counter and hands out a [`Ticket`].
//! A fetch outcome is applied only if its ticket is still the latest, so a
//! slow response for an older query can never overwrite a newer one.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::FetchError,
    model::{Query, ViewState, WeatherResult},
    provider::WeatherProvider,
};

/// Proof of a submission: which generation it belongs to and what to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    query: Query,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &Query {
        &self.query
    }
}

#[derive(Debug)]
pub struct Session {
    provider: Arc<dyn WeatherProvider>,
    state: ViewState,
    generation: u64,
}

impl Session {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider, state: ViewState::Idle, generation: 0 }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Shared handle to the provider, for running a fetch off the session.
    pub fn fetcher(&self) -> Arc<dyn WeatherProvider> {
        Arc::clone(&self.provider)
    }

    /// Starts a new lookup. Blank input resets to `Idle` and returns `None`.
    ///
    /// Either way any fetch still in flight becomes stale.
    pub fn submit(&mut self, input: &str) -> Option<Ticket> {
        self.generation += 1;

        match Query::new(input) {
            Some(query) => {
                debug!(generation = self.generation, city = %query, "Query submitted");
                self.state = ViewState::Loading;
                Some(Ticket { generation: self.generation, query })
            }
            None => {
                self.state = ViewState::Idle;
                None
            }
        }
    }

    /// Applies a fetch outcome. Returns `false` when the ticket is stale and
    /// the outcome was discarded.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        outcome: Result<WeatherResult, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                city = %ticket.query,
                "Discarding stale weather result"
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => ViewState::Loaded(result),
            Err(err) => {
                warn!(city = %ticket.query, detail = %err.detail(), "Weather lookup failed");
                ViewState::Error(err.to_string())
            }
        };

        true
    }

    /// Submit, fetch and apply in one step.
    pub async fn search(&mut self, input: &str) -> &ViewState {
        if let Some(ticket) = self.submit(input) {
            let outcome = self.provider.current_weather(ticket.query()).await;
            self.complete(&ticket, outcome);
        }

        &self.state
    }
}
