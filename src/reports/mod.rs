use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use changeover::OptimizationResult;

fn minutes(v: f64) -> String {
    format!("{:.1}", v)
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Final sequence, truncated to `limit` rows (0 prints everything).
pub fn print_sequence(name: &str, result: &OptimizationResult, limit: usize) {
    println!("\nSequence: {}", name);
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Order").add_attribute(Attribute::Bold),
        Cell::new("Was"),
        Cell::new("Work").fg(Color::Cyan),
        Cell::new("Down").fg(Color::Red),
        Cell::new("Changed"),
    ]);
    right_align(&mut table, 2, 4);

    let shown = if limit == 0 {
        result.sequence.len()
    } else {
        limit.min(result.sequence.len())
    };

    for o in &result.sequence[..shown] {
        table.add_row(vec![
            Cell::new(o.sequence_number),
            Cell::new(&o.order.id).add_attribute(Attribute::Bold),
            Cell::new(o.order.original_index + 1),
            Cell::new(minutes(o.work_time)),
            Cell::new(minutes(o.downtime)),
            Cell::new(o.changeover_reasons.join(", ")),
        ]);
    }
    println!("{}", table);

    if shown < result.sequence.len() {
        println!("... {} more orders", result.sequence.len() - shown);
    }
}

pub fn print_attribute_stats(result: &OptimizationResult) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Attribute").add_attribute(Attribute::Bold),
        Cell::new("Group"),
        Cell::new("Changes"),
        Cell::new("Minutes").fg(Color::Cyan),
    ]);
    right_align(&mut table, 2, 3);

    for s in &result.attribute_stats {
        table.add_row(vec![
            Cell::new(&s.column).add_attribute(Attribute::Bold),
            Cell::new(s.parallel_group.as_deref().unwrap_or("-")),
            Cell::new(s.changeover_count),
            Cell::new(minutes(s.total_time)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_totals(result: &OptimizationResult) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Before"),
        Cell::new("After"),
        Cell::new("Savings").fg(Color::Green),
        Cell::new("%").fg(Color::Green),
    ]);
    right_align(&mut table, 1, 4);

    table.add_row(vec![
        Cell::new("Work time").add_attribute(Attribute::Bold),
        Cell::new(minutes(result.total_before)),
        Cell::new(minutes(result.total_after)),
        Cell::new(minutes(result.savings)).fg(Color::Green),
        Cell::new(format!("{:.1}%", result.savings_percent)).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Downtime").add_attribute(Attribute::Bold),
        Cell::new(minutes(result.total_downtime_before)),
        Cell::new(minutes(result.total_downtime_after)),
        Cell::new(minutes(result.downtime_savings)).fg(Color::Green),
        Cell::new(format!("{:.1}%", result.downtime_savings_percent)).fg(Color::Green),
    ]);
    println!("\n{}", table);

    // Plain lines for scripts grepping the output.
    println!("Work: {:.2} -> {:.2}", result.total_before, result.total_after);
    println!(
        "Downtime: {:.2} -> {:.2}",
        result.total_downtime_before, result.total_downtime_after
    );
}

/// One line per job when several were optimized together.
pub fn print_batch_summary(rows: &[(String, Option<&OptimizationResult>)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Job").add_attribute(Attribute::Bold),
        Cell::new("Orders"),
        Cell::new("Work"),
        Cell::new("Saved"),
        Cell::new("Down"),
        Cell::new("Saved"),
    ]);
    right_align(&mut table, 1, 5);

    for (name, result) in rows {
        match result {
            Some(r) => table.add_row(vec![
                Cell::new(name).add_attribute(Attribute::Bold),
                Cell::new(r.sequence.len()),
                Cell::new(minutes(r.total_after)),
                Cell::new(format!("{:.1}%", r.savings_percent)).fg(Color::Green),
                Cell::new(minutes(r.total_downtime_after)),
                Cell::new(format!("{:.1}%", r.downtime_savings_percent)).fg(Color::Green),
            ]),
            None => table.add_row(vec![
                Cell::new(name).add_attribute(Attribute::Bold),
                Cell::new("failed").fg(Color::Red),
            ]),
        };
    }
    println!("\n{}", table);
}
