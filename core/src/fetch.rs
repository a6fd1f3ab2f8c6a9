//! Request lifecycle for a single list/detail fetch.
//!
//! # Design
//! A `FetchList<T>` is bound to one immutable `HttpRequest` and owns a
//! `FetchState<T>`. It never fetches on its own: the caller starts a fetch
//! with `trigger` (which flips the state to `Loading` before any I/O
//! happens) and feeds the outcome back with `resolve`, or does both at once
//! through `refresh` and an `HttpTransport`.
//!
//! Every trigger bumps a generation counter and the returned `FetchTicket`
//! remembers it. Resolving an older ticket after a newer trigger is a no-op,
//! so a slow first response can never overwrite the result of a later
//! fetch. In-flight requests are not cancelled; their results are dropped.
//!
//! Failures keep the previous payload around (`Failed { previous }`) so a
//! view can keep showing stale rows next to the error.

use std::mem;

use serde::de::DeserializeOwned;

use crate::client::parse_envelope;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};

/// Where a fetch is in its lifecycle. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Idle,
    Loading { previous: Option<T> },
    Success(T),
    Failed { previous: Option<T> },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The latest payload, including a stale one carried through a reload
    /// or a failure.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Idle => None,
            Self::Success(data) => Some(data),
            Self::Loading { previous } | Self::Failed { previous } => previous.as_ref(),
        }
    }

    fn into_data(self) -> Option<T> {
        match self {
            Self::Idle => None,
            Self::Success(data) => Some(data),
            Self::Loading { previous } | Self::Failed { previous } => previous,
        }
    }
}

/// What a view renders from: `{data, loading, error}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSnapshot<'a, T> {
    pub data: Option<&'a T>,
    pub loading: bool,
    pub error: bool,
}

/// Handle for one triggered fetch. Carries the request to execute.
#[derive(Debug, Clone)]
#[must_use = "a triggered fetch stays Loading until its ticket is resolved"]
pub struct FetchTicket {
    generation: u64,
    request: HttpRequest,
}

impl FetchTicket {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

/// Whether a resolved outcome was written to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer trigger happened first; the outcome was dropped.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct FetchList<T> {
    request: HttpRequest,
    state: FetchState<T>,
    generation: u64,
}

impl<T> FetchList<T> {
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            state: FetchState::Idle,
            generation: 0,
        }
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn snapshot(&self) -> FetchSnapshot<'_, T> {
        FetchSnapshot {
            data: self.state.data(),
            loading: self.state.is_loading(),
            error: self.state.is_error(),
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }

    /// Enter `Loading` and hand out the ticket for this fetch.
    pub fn trigger(&mut self) -> FetchTicket {
        self.generation += 1;
        let previous = mem::take(&mut self.state).into_data();
        self.state = FetchState::Loading { previous };
        tracing::debug!(
            method = %self.request.method,
            path = %self.request.path,
            generation = self.generation,
            "fetch started"
        );
        FetchTicket {
            generation: self.generation,
            request: self.request.clone(),
        }
    }
}

impl<T: DeserializeOwned> FetchList<T> {
    /// Apply the outcome of a triggered fetch.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Resolution {
        if ticket.generation != self.generation {
            tracing::debug!(
                path = %ticket.request.path,
                stale = ticket.generation,
                current = self.generation,
                "dropping superseded fetch result"
            );
            return Resolution::Superseded;
        }

        let result = outcome
            .map_err(ApiError::from)
            .and_then(|response| parse_envelope::<T>(&response));
        let previous = mem::take(&mut self.state).into_data();
        self.state = match result {
            Ok(data) => {
                tracing::debug!(path = %ticket.request.path, "fetch succeeded");
                FetchState::Success(data)
            }
            Err(err) => {
                tracing::warn!(path = %ticket.request.path, error = %err, "fetch failed");
                FetchState::Failed { previous }
            }
        };
        Resolution::Applied
    }

    /// Trigger, execute exactly one request, and resolve.
    pub fn refresh<X: HttpTransport + ?Sized>(&mut self, transport: &X) -> Resolution {
        let ticket = self.trigger();
        let outcome = transport.execute(ticket.request());
        self.resolve(ticket, outcome)
    }
}
