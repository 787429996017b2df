use std::num::NonZeroUsize;

use tracing::{debug, info};

/// What the next render pass has to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing confirmed; prompt only.
    #[default]
    Idle,
    /// The last confirm had no company or no day count.
    Error,
    /// The last confirm was valid; the selection it confirmed.
    Showing {
        companies: Vec<String>,
        days: NonZeroUsize,
    },
}

/// User input raised by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ToggleCompany(String),
    SetDays(Option<u32>),
    Confirm,
}

/// Outcome of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    Prompt,
    InvalidSelection,
    Show {
        companies: Vec<String>,
        days: NonZeroUsize,
    },
}

/// Selection and display phase of one interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    companies: Vec<String>,
    days: Option<u32>,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected tickers, in the order they were picked.
    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    pub fn days(&self) -> Option<u32> {
        self.days
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_selected(&self, ticker: &str) -> bool {
        self.companies.iter().any(|c| c == ticker)
    }

    pub fn apply(mut self, event: &Event) -> Self {
        match event {
            Event::ToggleCompany(ticker) => {
                if let Some(pos) = self.companies.iter().position(|c| c == ticker) {
                    self.companies.remove(pos);
                } else {
                    self.companies.push(ticker.clone());
                }
                debug!("companies: {:?}", self.companies);
            }
            Event::SetDays(days) => {
                self.days = *days;
                debug!("days: {:?}", self.days);
            }
            Event::Confirm => {
                self.phase = self.confirm();
                info!("confirm -> {:?}", self.phase);
            }
        }
        self
    }

    fn confirm(&self) -> Phase {
        let days = self
            .days
            .and_then(|d| NonZeroUsize::new(d as usize));
        match days {
            Some(days) if !self.companies.is_empty() => Phase::Showing {
                companies: self.companies.clone(),
                days,
            },
            _ => Phase::Error,
        }
    }

    /// Consume the phase for one pass: whatever it asks for is shown once and
    /// the session goes back to idle.
    pub fn render_pass(mut self) -> (Self, RenderPlan) {
        let plan = match std::mem::take(&mut self.phase) {
            Phase::Idle => RenderPlan::Prompt,
            Phase::Error => RenderPlan::InvalidSelection,
            Phase::Showing { companies, days } => RenderPlan::Show { companies, days },
        };
        (self, plan)
    }
}
