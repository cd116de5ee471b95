//! Payslips screen
//!
//! Read-only: payslips are issued by the payroll backend, the console
//! only lists and filters them.

use heron_client::{ClientError, HeronClient};
use shared::models::{sum_net, Payslip};

use crate::app::ConsoleError;
use crate::notify::Notifier;

/// Payslip list state
pub struct PayslipsScreen<'a> {
    client: &'a HeronClient,
    notifier: Notifier,
    items: Vec<Payslip>,
    period_filter: Option<String>,
    employee_filter: Option<i64>,
    error: Option<String>,
}

impl<'a> PayslipsScreen<'a> {
    pub fn new(client: &'a HeronClient, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            items: Vec::new(),
            period_filter: None,
            employee_filter: None,
            error: None,
        }
    }

    /// Fetch the full list
    pub async fn load(&mut self) -> Result<(), ConsoleError> {
        match self.client.payslips().list().await {
            Ok(items) => {
                self.items = items;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load payslips", e)),
        }
    }

    /// Filter by payroll period (`YYYY-MM`, exact match)
    pub fn set_period_filter(&mut self, period: Option<String>) {
        self.period_filter = period;
    }

    pub fn set_employee_filter(&mut self, employee_id: Option<i64>) {
        self.employee_filter = employee_id;
    }

    /// Rows matching the current filters
    pub fn visible(&self) -> Vec<&Payslip> {
        self.items
            .iter()
            .filter(|p| {
                self.period_filter
                    .as_ref()
                    .is_none_or(|period| &p.period == period)
                    && self.employee_filter.is_none_or(|id| p.employee_id == id)
            })
            .collect()
    }

    pub fn items(&self) -> &[Payslip] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Net total over the visible rows
    pub fn total_net(&self) -> f64 {
        let visible: Vec<Payslip> = self.visible().into_iter().cloned().collect();
        sum_net(&visible)
    }

    fn fail(&mut self, what: &str, e: ClientError) -> ConsoleError {
        let message = format!("{what}: {e}");
        self.error = Some(message.clone());
        self.notifier.error(message);
        e.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slip(id: i64, employee_id: i64, period: &str, net: f64) -> Payslip {
        Payslip {
            id,
            employee_id,
            employee_name: "Test".to_string(),
            period: period.to_string(),
            gross: net * 1.4,
            net,
            currency: "EUR".to_string(),
            issued_at: 0,
        }
    }

    // Filters are screen-local state, so they are testable without a
    // backend by seeding the list directly.
    fn screen_with_items<'a>(
        client: &'a heron_client::HeronClient,
        items: Vec<Payslip>,
    ) -> PayslipsScreen<'a> {
        let mut screen = PayslipsScreen::new(client, crate::notify::Notifier::new());
        screen.items = items;
        screen
    }

    #[tokio::test]
    async fn test_period_and_employee_filters() {
        let client =
            heron_client::HeronClient::new(heron_client::ClientConfig::new("http://unused")).await;
        let mut screen = screen_with_items(
            &client,
            vec![
                slip(1, 10, "2026-06", 1000.0),
                slip(2, 10, "2026-07", 1000.0),
                slip(3, 11, "2026-07", 2000.0),
            ],
        );

        assert_eq!(screen.visible().len(), 3);

        screen.set_period_filter(Some("2026-07".to_string()));
        assert_eq!(screen.visible().len(), 2);
        assert_eq!(screen.total_net(), 3000.0);

        screen.set_employee_filter(Some(10));
        assert_eq!(screen.visible().len(), 1);
        assert_eq!(screen.total_net(), 1000.0);
    }
}
