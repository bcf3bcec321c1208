use anyhow::{Context, Result};
use mockable::DefaultClock;
use person_table::{LineSink, ListChange, Person, RowEditor, StdoutSink, seed};
use tracing_subscriber::EnvFilter;

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

mod commands;

use commands::{Commands, Line, joined};

const PROMPT: &str = "persontab> ";

fn render_table(rows: &[Person]) {
    let columns = seed::columns();
    let mut widths: Vec<usize> = columns.iter().map(|column| column.title().len()).collect();
    for person in rows {
        for (width, column) in widths.iter_mut().zip(columns) {
            *width = (*width).max(column.cell(person).chars().count());
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| format!("{:<width$}", column.title()))
        .collect();
    println!("    {}", header.join(" | "));

    for (index, person) in rows.iter().enumerate() {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(column, &width)| format!("{:<width$}", column.cell(person)))
            .collect();
        println!("{index:>3} {}", cells.join(" | "));
    }
}

/// Applies one command. Returns false when the session should end.
fn dispatch<S: LineSink>(editor: &mut RowEditor<S>, command: Commands) -> bool {
    match command {
        Commands::First { name } => editor.form_mut().first_name = joined(&name),
        Commands::Last { name } => editor.form_mut().last_name = joined(&name),
        Commands::Birth { date } => editor.form_mut().birth_date = date,
        Commands::Add => editor.add_person(),
        Commands::Select { indices } => {
            for index in indices {
                editor.select_row(index);
            }
            println!("Selected rows: {:?}", editor.selection().selected_indices());
        }
        Commands::Deselect => editor.selection_mut().clear(),
        Commands::Delete => editor.delete_selected_rows(),
        Commands::Restore => editor.restore_rows(),
        Commands::Clear => editor.clear_fields(),
        Commands::List => render_table(editor.rows().as_slice()),
        Commands::Age { index } => {
            if let Some(person) = editor.row_or_report(index) {
                println!("{}", person.age_category_with(&DefaultClock));
            }
        }
        Commands::Save { index } => {
            if let Some(person) = editor.row_or_report(index) {
                let mut errors = Vec::new();
                if !person.save_with(&DefaultClock, editor.sink_mut(), &mut errors) {
                    for error in &errors {
                        editor.sink_mut().emit_line(error);
                    }
                }
            }
        }
        Commands::Quit => return false,
    }
    true
}

/// Subscribes to the row list. The returned flag is raised by every change
/// and tells the view the table needs redrawing.
fn watch_rows<S: LineSink>(editor: &mut RowEditor<S>) -> Rc<Cell<bool>> {
    let dirty = Rc::new(Cell::new(false));
    let changed = Rc::clone(&dirty);
    editor.rows_mut().subscribe(move |change: &ListChange<Person>| {
        match change {
            ListChange::Added { from, to } => tracing::debug!(from, to, "Rows added"),
            ListChange::Removed { index, item } => tracing::debug!(index, %item, "Row removed"),
            ListChange::Cleared { removed } => tracing::debug!(removed, "Rows cleared"),
        }
        changed.set(true);
    });
    dirty
}

fn run() -> Result<()> {
    let mut editor = RowEditor::new(StdoutSink);
    let dirty = watch_rows(&mut editor);

    tracing::info!(rows = editor.rows().len(), "Table ready");
    render_table(editor.rows().as_slice());

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        print!("{PROMPT}");
        std::io::stdout().flush().context("Could not flush prompt")?;

        line.clear();
        if input.read_line(&mut line).context("Could not read input")? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Line::parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        if !dispatch(&mut editor, command) {
            break;
        }
        if dirty.replace(false) {
            render_table(editor.rows().as_slice());
        }
    }

    tracing::info!("Session ended");
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    run()
}
