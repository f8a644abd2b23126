//! [`Inquiry`]-related read definitions.

use std::time::Duration;

use common::DateTime;

use crate::domain::{city, Inquiry};

/// Relative date window to filter [`Inquiry`]s by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DateWindow {
    /// Submitted since the start of the current day (UTC).
    Today,

    /// Submitted during the last 7 days.
    Week,

    /// Submitted during the last 30 days.
    Month,
}

impl DateWindow {
    /// Returns the earliest [`DateTime`] included into this [`DateWindow`]
    /// relative to the provided `now`.
    #[must_use]
    pub fn since(self, now: DateTime) -> DateTime {
        const DAY: Duration = Duration::from_secs(24 * 60 * 60);

        match self {
            Self::Today => now.start_of_day(),
            Self::Week => now - 7 * DAY,
            Self::Month => now - 30 * DAY,
        }
    }
}

/// Filter of an [`Inquiry`] list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// ID of the [`City`] the [`Inquiry`] must refer to.
    ///
    /// [`City`]: crate::domain::City
    pub city_id: Option<city::Id>,

    /// [`DateWindow`] the [`Inquiry`] must be submitted within.
    pub window: Option<DateWindow>,
}

impl Filter {
    /// Indicates whether the provided [`Inquiry`] satisfies this [`Filter`]
    /// at the provided `now`.
    #[must_use]
    pub fn matches(&self, inquiry: &Inquiry, now: DateTime) -> bool {
        let city_matches = self
            .city_id
            .as_ref()
            .map_or(true, |id| inquiry.city_id.as_ref() == Some(id));
        let window_matches = self
            .window
            .map_or(true, |w| inquiry.created_at.coerce() >= w.since(now));
        city_matches && window_matches
    }

    /// Retains only the [`Inquiry`]s satisfying this [`Filter`] at the
    /// provided `now`, preserving their order.
    #[must_use]
    pub fn apply(
        &self,
        inquiries: Vec<Inquiry>,
        now: DateTime,
    ) -> Vec<Inquiry> {
        inquiries
            .into_iter()
            .filter(|i| self.matches(i, now))
            .collect()
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;

    use crate::domain::{city, contact::Email, inquiry, Inquiry, Name};

    use super::{DateWindow, Filter};

    const HOUR: Duration = Duration::from_secs(60 * 60);

    fn now() -> DateTime {
        DateTime::from_rfc3339("2024-06-15T12:00:00Z").unwrap()
    }

    fn inquiry(city: Option<&str>, ago: Duration) -> Inquiry {
        Inquiry {
            id: inquiry::Id::new(),
            name: Name::new("Mona").unwrap(),
            email: Email::new("mona@example.com").unwrap(),
            phone: None,
            city_id: city.map(|c| city::Id::new(c).unwrap()),
            unit_id: None,
            message: None,
            created_at: (now() - ago).coerce(),
        }
    }

    /// Newest first, as listed.
    fn inquiries() -> Vec<Inquiry> {
        vec![
            inquiry(Some("new-cairo"), HOUR),
            inquiry(Some("october"), 2 * HOUR),
            inquiry(Some("new-cairo"), 13 * HOUR),
            inquiry(None, 3 * 24 * HOUR),
            inquiry(Some("new-cairo"), 20 * 24 * HOUR),
            inquiry(Some("october"), 45 * 24 * HOUR),
        ]
    }

    fn ids(list: &[Inquiry]) -> Vec<inquiry::Id> {
        list.iter().map(|i| i.id).collect()
    }

    #[test]
    fn windows_are_relative_to_now() {
        assert_eq!(
            DateWindow::Today.since(now()),
            DateTime::from_rfc3339("2024-06-15T00:00:00Z").unwrap(),
        );
        assert_eq!(
            DateWindow::Week.since(now()),
            DateTime::from_rfc3339("2024-06-08T12:00:00Z").unwrap(),
        );
        assert_eq!(
            DateWindow::Month.since(now()),
            DateTime::from_rfc3339("2024-05-16T12:00:00Z").unwrap(),
        );
    }

    #[test]
    fn composes_city_and_window() {
        let all = inquiries();

        let filtered = Filter {
            city_id: Some(city::Id::new("new-cairo").unwrap()),
            window: Some(DateWindow::Today),
        }
        .apply(all.clone(), now());

        assert_eq!(ids(&filtered), [all[0].id]);
    }

    #[test]
    fn filters_by_single_criterion() {
        let all = inquiries();

        let by_city = Filter {
            city_id: Some(city::Id::new("october").unwrap()),
            window: None,
        }
        .apply(all.clone(), now());
        assert_eq!(ids(&by_city), [all[1].id, all[5].id]);

        let by_week = Filter {
            city_id: None,
            window: Some(DateWindow::Week),
        }
        .apply(all.clone(), now());
        assert_eq!(ids(&by_week), ids(&all[..4]));

        let by_month = Filter {
            city_id: None,
            window: Some(DateWindow::Month),
        }
        .apply(all.clone(), now());
        assert_eq!(ids(&by_month), ids(&all[..5]));
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let all = inquiries();

        let filtered = Filter::default().apply(all.clone(), now());

        assert_eq!(ids(&filtered), ids(&all));
    }
}
