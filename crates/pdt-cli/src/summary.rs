use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pdt_model::{AnalysisSource, DayType, Period, Trace, format_display};

use pdt_cli::types::DocumentAnalysis;

pub fn print_summary(analysis: &DocumentAnalysis) {
    let result = &analysis.result;
    println!("Document: {}", analysis.document);
    println!("Input: {}", analysis.input);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Shooting days"),
        Cell::new(result.date_count).add_attribute(Attribute::Bold),
    ]);
    if result.start_day_offset > 0 {
        table.add_row(vec![
            Cell::new("Including earlier days"),
            Cell::new(result.total_shooting_days()),
        ]);
    }
    table.add_row(vec![Cell::new("Sequences"), Cell::new(result.sequence_count)]);
    table.add_row(vec![Cell::new("Period"), period_cell(&result.period)]);
    table.add_row(vec![Cell::new("Start"), Cell::new(&result.start_day_info)]);
    table.add_row(vec![Cell::new("Source"), source_cell(result.source)]);
    if let Some(year) = result.document_year {
        table.add_row(vec![Cell::new("Year"), Cell::new(year)]);
    }
    println!("{table}");

    print_day_table(analysis);
    if !result.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &result.warnings {
            eprintln!("- {warning}");
        }
    }
}

fn print_day_table(analysis: &DocumentAnalysis) {
    if analysis.schedule.days.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Type"),
        header_cell("Location"),
        header_cell("Sequences"),
    ]);
    apply_day_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for day in &analysis.schedule.days {
        table.add_row(vec![
            Cell::new(format_display(day.date)),
            day_type_cell(day.day_type),
            text_cell(day.location_key().unwrap_or_default()),
            text_cell(&day.sequences.join(", ")),
        ]);
    }
    println!();
    println!("Days:");
    println!("{table}");
}

pub fn print_trace(trace: &Trace) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Strategy"),
        header_cell(""),
        header_cell("Reason"),
        header_cell("Value"),
        header_cell("Line"),
    ]);
    apply_day_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for event in trace.events() {
        let verdict = if event.accepted {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("✗").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(event.strategy).fg(Color::Blue),
            verdict,
            Cell::new(event.reason),
            text_cell(&event.value),
            event.line.map_or_else(|| dim_cell("-"), |line| Cell::new(line + 1)),
        ]);
    }
    println!();
    println!("Trace:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_day_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn period_cell(period: &Period) -> Cell {
    match period {
        Period::Range { .. } => Cell::new(period).add_attribute(Attribute::Bold),
        Period::Sequential => Cell::new(period).fg(Color::Yellow),
        Period::Unknown => dim_cell(period),
    }
}

fn source_cell(source: AnalysisSource) -> Cell {
    match source {
        AnalysisSource::Oracle => Cell::new(source).fg(Color::Magenta),
        AnalysisSource::Matrix => Cell::new(source).fg(Color::Green),
        AnalysisSource::Engine => Cell::new(source),
    }
}

fn day_type_cell(day_type: DayType) -> Cell {
    match day_type {
        DayType::Shoot => Cell::new(day_type)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        DayType::Off => dim_cell(day_type),
        _ => Cell::new(day_type).fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
