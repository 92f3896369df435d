// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Horaire v{} - Converts published HTML class timetables into datasets and iCalendar files",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!(
        "    {} <input.html> [output.json]              Parse a timetable export",
        binary_name
    );
    println!(
        "    {} export <dataset.json> --group <id> --from <date> --to <date>",
        binary_name
    );
    println!("    {} --help                                  Show this help message", binary_name);
    println!();
    println!("PARSE COMMAND:");
    println!("    Reads the HTML export, reconstructs every group's weekly sessions and");
    println!("    writes the dataset as JSON (default: timetable.json). Prints the number");
    println!("    of groups written.");
    println!();
    println!("EXPORT COMMAND:");
    println!("    Encodes one group of a previously written dataset as an iCalendar file");
    println!("    on stdout, with one weekly recurring event per session.");
    println!();
    println!("    --group <id>          Group id as listed in the dataset");
    println!("    --from <YYYY-MM-DD>   First day of the semester (inclusive)");
    println!("    --to <YYYY-MM-DD>     Last day of the semester (inclusive)");
    println!();
    println!("    {} export timetable.json --group 3A --from 2026-01-19 --to 2026-05-30 > 3A.ics", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose         Log parse diagnostics (defaulted labels, skipped cells)");
    println!("    -h, --help            Show this help message.");
}
