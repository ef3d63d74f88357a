//! Listing record and column layout.

/// Columns of the listing table, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Reference,
    Requirements,
    Hours,
    Tasks,
    Activities,
    Location,
    Salary,
    Type,
    Period,
    Link,
}

impl Column {
    /// Every column in output order.
    pub const ALL: [Column; 11] = [
        Column::Title,
        Column::Reference,
        Column::Requirements,
        Column::Hours,
        Column::Tasks,
        Column::Activities,
        Column::Location,
        Column::Salary,
        Column::Type,
        Column::Period,
        Column::Link,
    ];

    /// Header name used in the exported file.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::Reference => "reference",
            Column::Requirements => "requirements",
            Column::Hours => "hours",
            Column::Tasks => "tasks",
            Column::Activities => "activities",
            Column::Location => "location",
            Column::Salary => "salary",
            Column::Type => "type",
            Column::Period => "period",
            Column::Link => "link",
        }
    }
}

/// One job posting as extracted from its detail page.
///
/// `None` marks a field that was not present on the page; it is distinct
/// from `Some("")`, an element that was present but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRecord {
    pub title: Option<String>,

    /// Nominal identifier shown on the page. Not guaranteed unique.
    pub reference: Option<String>,

    /// Requirement items joined with `", "`
    pub requirements: Option<String>,

    pub hours: Option<String>,
    pub tasks: Option<String>,
    pub activities: Option<String>,
    pub location: Option<String>,

    /// Free text, may read "negotiable" or carry a currency word
    pub salary: Option<String>,

    pub kind: Option<String>,

    /// `"{start} - {end}"`, either side may be blank
    pub period: Option<String>,

    /// Detail page URL exactly as collected from the index
    pub link: String,
}

impl ListingRecord {
    /// Record for a detail page that could not be loaded.
    pub fn unavailable(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Self::default()
        }
    }

    /// Value of a single cell.
    pub fn cell(&self, column: Column) -> Option<&str> {
        match column {
            Column::Title => self.title.as_deref(),
            Column::Reference => self.reference.as_deref(),
            Column::Requirements => self.requirements.as_deref(),
            Column::Hours => self.hours.as_deref(),
            Column::Tasks => self.tasks.as_deref(),
            Column::Activities => self.activities.as_deref(),
            Column::Location => self.location.as_deref(),
            Column::Salary => self.salary.as_deref(),
            Column::Type => self.kind.as_deref(),
            Column::Period => self.period.as_deref(),
            Column::Link => Some(self.link.as_str()),
        }
    }

    /// Cells in column order, missing values rendered as empty text.
    pub fn to_row(&self) -> Vec<&str> {
        Column::ALL
            .iter()
            .map(|&column| self.cell(column).unwrap_or(""))
            .collect()
    }

    /// Rebuild a record from cells in column order. Empty cells are missing.
    pub fn from_row<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut record = Self::default();
        for (column, cell) in Column::ALL.iter().zip(cells) {
            let value = (!cell.is_empty()).then(|| cell.to_string());
            match column {
                Column::Title => record.title = value,
                Column::Reference => record.reference = value,
                Column::Requirements => record.requirements = value,
                Column::Hours => record.hours = value,
                Column::Tasks => record.tasks = value,
                Column::Activities => record.activities = value,
                Column::Location => record.location = value,
                Column::Salary => record.salary = value,
                Column::Type => record.kind = value,
                Column::Period => record.period = value,
                Column::Link => record.link = cell.to_string(),
            }
        }
        record
    }

    /// Case-insensitive substring test on the requirements field.
    ///
    /// A record without requirements never matches.
    pub fn requires(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.requirements
            .as_deref()
            .is_some_and(|req| req.to_lowercase().contains(&keyword))
    }
}
