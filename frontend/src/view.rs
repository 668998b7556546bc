use log::{debug, error, info, warn};

use crate::api::{read_expense_list, read_upload, ExpenseApi};
use crate::chart::PieChart;
use crate::config::Panels;
use crate::error::ApiError;
use crate::model::Expense;
use crate::notify::Severity;
use crate::sequence::RequestSequencer;

pub const UPLOAD_OK_FALLBACK: &str = "Receipt uploaded";

/// Handles to the parts of the page the controller writes to.
pub trait ViewSurface {
    /// Replaces the rendered expense cards.
    fn show_expenses(&self, expenses: Vec<Expense>);

    /// A list fetch failed. Cards from an earlier fetch stay up.
    fn expenses_unavailable(&self);

    fn draw_chart(&self, chart: PieChart);

    fn show_receipt(&self, expense: Expense);

    fn notify(&self, severity: Severity, message: String);
}

pub struct ExpenseView<A, S> {
    api: A,
    surface: S,
    panels: Panels,
    sequencer: RequestSequencer,
}

impl<A: ExpenseApi, S: ViewSurface> ExpenseView<A, S> {
    pub fn new(api: A, surface: S, panels: Panels) -> Self {
        Self {
            api,
            surface,
            panels,
            sequencer: RequestSequencer::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub async fn load_on_start(&self) {
        if self.panels.wants_initial_load() {
            self.load_expenses().await;
        }
    }

    pub async fn submit_receipt(&self, upload: A::Upload) {
        match self.api.submit_receipt(upload).await.and_then(read_upload) {
            Ok(accepted) => {
                let message = accepted
                    .message
                    .unwrap_or_else(|| UPLOAD_OK_FALLBACK.to_string());
                info!("receipt upload accepted: {}", message);
                self.surface.notify(Severity::Success, message);
                if let Some(expense) = accepted.data {
                    if self.panels.receipt_detail {
                        self.surface.show_receipt(expense);
                    }
                }
                self.load_expenses().await;
            }
            Err(err) => {
                log_failure("receipt upload", &err);
                self.surface
                    .notify(Severity::Error, format!("Upload failed: {}", err));
            }
        }
    }

    pub async fn load_expenses(&self) {
        let ticket = self.sequencer.issue();
        let outcome = self.api.list_expenses().await.and_then(read_expense_list);

        if !self.sequencer.is_latest(ticket) {
            debug!("discarding expense list for superseded {:?}", ticket);
            return;
        }

        match outcome {
            Ok(expenses) => self.apply(expenses),
            Err(err) => {
                log_failure("expense list", &err);
                if self.panels.expense_list {
                    self.surface.expenses_unavailable();
                }
                self.surface
                    .notify(Severity::Error, format!("Could not load expenses: {}", err));
            }
        }
    }

    fn apply(&self, expenses: Vec<Expense>) {
        info!("loaded {} expenses", expenses.len());
        if self.panels.chart {
            self.surface.draw_chart(PieChart::from_expenses(&expenses));
        }
        if self.panels.expense_list {
            self.surface.show_expenses(expenses);
        }
    }
}

fn log_failure(what: &str, err: &ApiError) {
    match err {
        ApiError::Transport(_) => error!("{} failed: {}", what, err),
        _ => warn!("{} rejected: {}", what, err),
    }
}
