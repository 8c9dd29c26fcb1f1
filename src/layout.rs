pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 20;
pub const PREVIEW_MIN_TERMINAL_WIDTH: u16 = 120;
pub const TITLE_MIN_WIDTH: u16 = 20;
pub const TABLE_MIN_HEIGHT: u16 = 10;
pub const FILTER_ROWS: u16 = 4;
pub const PREVIEW_HINT: &str = "Preview disabled - widen terminal (need more than 120 columns)";

const TABLE_PERCENT: u16 = 60;
const PREVIEW_PERCENT: u16 = 35;
const HORIZONTAL_CHROME: u16 = 4;
// Header, quick-filter bar, column header, status and help lines.
const VERTICAL_CHROME: u16 = 10;
const DETAIL_CHROME: u16 = 4;
const COLUMN_GAP: u16 = 1;
const MEDIUM_TIER_WIDTH: u16 = 80;
const WIDE_TIER_WIDTH: u16 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnName {
    Number,
    Title,
    State,
    Assignee,
    Labels,
    Updated,
    Repo,
}

impl ColumnName {
    pub fn header(self) -> &'static str {
        match self {
            Self::Number => "#",
            Self::Title => "Title",
            Self::State => "State",
            Self::Assignee => "Assignee",
            Self::Labels => "Labels",
            Self::Updated => "Updated",
            Self::Repo => "Repo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: ColumnName,
    pub width: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub columns: Vec<Column>,
    pub show_preview_pane: bool,
    pub preview_hint: Option<&'static str>,
    pub table_width: u16,
    pub table_height: u16,
    pub preview_width: u16,
    pub spacer_width: u16,
    pub detail_width: u16,
    pub detail_height: u16,
}

impl LayoutPlan {
    #[cfg(test)]
    pub fn column(&self, name: ColumnName) -> Option<Column> {
        self.columns
            .iter()
            .copied()
            .find(|column| column.name == name)
    }
}

/// Derives pane geometry and the column set from the terminal size.
pub fn plan(width: u16, height: u16, filters_visible: bool, preview_requested: bool) -> LayoutPlan {
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);
    let available_width = width - HORIZONTAL_CHROME;

    let show_preview_pane = preview_requested && width > PREVIEW_MIN_TERMINAL_WIDTH;
    let preview_hint = (preview_requested && !show_preview_pane).then_some(PREVIEW_HINT);
    let (table_width, preview_width) = if show_preview_pane {
        (
            percent(available_width, TABLE_PERCENT),
            percent(available_width, PREVIEW_PERCENT),
        )
    } else {
        (available_width, 0)
    };
    let spacer_width = if show_preview_pane {
        available_width - table_width - preview_width
    } else {
        0
    };

    let mut usable_height = height.saturating_sub(VERTICAL_CHROME);
    if filters_visible {
        usable_height = usable_height.saturating_sub(FILTER_ROWS);
    }

    LayoutPlan {
        columns: columns_for(table_width),
        show_preview_pane,
        preview_hint,
        table_width,
        table_height: usable_height.max(TABLE_MIN_HEIGHT),
        preview_width,
        spacer_width,
        detail_width: available_width,
        detail_height: height - DETAIL_CHROME,
    }
}

fn percent(value: u16, percent: u16) -> u16 {
    (u32::from(value) * u32::from(percent) / 100) as u16
}

fn columns_for(table_width: u16) -> Vec<Column> {
    let fixed: &[(ColumnName, u16)] = if table_width < MEDIUM_TIER_WIDTH {
        &[
            (ColumnName::Number, 6),
            (ColumnName::State, 8),
            (ColumnName::Assignee, 10),
        ]
    } else if table_width < WIDE_TIER_WIDTH {
        &[
            (ColumnName::Number, 7),
            (ColumnName::State, 9),
            (ColumnName::Assignee, 12),
            (ColumnName::Labels, 15),
            (ColumnName::Updated, 10),
        ]
    } else {
        &[
            (ColumnName::Number, 7),
            (ColumnName::State, 9),
            (ColumnName::Assignee, 15),
            (ColumnName::Labels, 18),
            (ColumnName::Updated, 10),
            (ColumnName::Repo, 15),
        ]
    };

    let gaps = COLUMN_GAP * fixed.len() as u16;
    let taken = fixed.iter().map(|(_, width)| *width).sum::<u16>() + gaps;
    // Floored even when that overflows the table; the row is then clipped.
    let title_width = table_width.saturating_sub(taken).max(TITLE_MIN_WIDTH);

    let mut columns = Vec::with_capacity(fixed.len() + 1);
    for (index, (name, width)) in fixed.iter().enumerate() {
        columns.push(Column {
            name: *name,
            width: *width,
        });
        if index == 0 {
            columns.push(Column {
                name: ColumnName::Title,
                width: title_width,
            });
        }
    }
    columns
}
