use crate::features::reports::models::Report;

/// Sortable columns of the admin report table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Category,
    Status,
    Urgency,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current table ordering. Sorting is a local view concern and never
/// triggers a re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl TableSort {
    /// Clicking a column header: the same field flips direction, a new
    /// field starts over descending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    /// Order a snapshot of reports. String columns compare on their wire
    /// values, the date column chronologically.
    pub fn sort(&self, reports: &mut [Report]) {
        reports.sort_by(|a, b| {
            let ordering = match self.field {
                SortField::Title => a.title.cmp(&b.title),
                SortField::Category => a.category.as_str().cmp(b.category.as_str()),
                SortField::Status => a.status.as_str().cmp(b.status.as_str()),
                SortField::Urgency => a.urgency.as_str().cmp(b.urgency.as_str()),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}
