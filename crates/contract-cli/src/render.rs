//! Terminal tables for schemas and value checks.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use contract_model::{Category, FormSchema, NormalizedFormField, SchemaOrigin, ValueIssue};

pub fn print_schema(schema: &FormSchema) {
    if let SchemaOrigin::Fallback(reason) = schema.origin {
        println!("Fallback schema: {}", reason.description());
    }
    if let Some(version) = &schema.template_version {
        println!("Template version: {version}");
    }
    println!("{}", schema_table(schema));
    if !schema.selection_fields.is_empty() {
        println!();
        println!("Must be selected manually:");
        for name in &schema.selection_fields {
            println!("- {name}");
        }
    }
}

pub fn schema_table(schema: &FormSchema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Req"),
        header_cell("Max"),
        header_cell("Placeholder"),
        header_cell("Source"),
    ]);
    apply_schema_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);
    for (category, fields) in schema.by_category() {
        for (position, field) in fields.into_iter().enumerate() {
            let category_cell = if position == 0 {
                category_cell(category)
            } else {
                dim_cell("")
            };
            table.add_row(field_row(category_cell, field));
        }
    }
    table
}

fn field_row(category_cell: Cell, field: &NormalizedFormField) -> Vec<Cell> {
    vec![
        category_cell,
        Cell::new(&field.key).add_attribute(Attribute::Bold),
        Cell::new(&field.label),
        Cell::new(field.input_kind),
        required_cell(field.required),
        Cell::new(field.max_length),
        if field.placeholder.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&field.placeholder)
        },
        dim_cell(&field.source_name),
    ]
}

pub fn categories_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Category"), header_cell("Title")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for category in Category::PRECEDENCE {
        table.add_row(vec![
            Cell::new(category.rank() + 1),
            category_cell(category),
            Cell::new(category.label()),
        ]);
    }
    table
}

pub fn issues_table(issues: &[ValueIssue]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Key"), header_cell("Problem")]);
    apply_table_style(&mut table);
    for issue in issues {
        table.add_row(vec![
            Cell::new(&issue.key).fg(Color::Red).add_attribute(Attribute::Bold),
            Cell::new(issue),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_schema_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn category_cell(category: Category) -> Cell {
    Cell::new(category.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
