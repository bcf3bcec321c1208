/// Line-oriented destination for user-facing messages.
pub trait LineSink {
    fn emit_line(&mut self, line: &str);
}

/// Writes each line to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn emit_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Collects lines in memory; handy for capturing output.
impl LineSink for Vec<String> {
    fn emit_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}
