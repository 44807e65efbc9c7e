use crate::ast::*;
use std::io::{Result, Write};

#[derive(Debug, Clone)]
pub struct PrintOptions {
    pub mode: PrintMode,
    pub show_spans: bool,
}

#[derive(Debug, Clone)]
pub enum PrintMode {
    Verbose,
    Summary,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            mode: PrintMode::Verbose,
            show_spans: false,
        }
    }
}

pub fn print_program_to_writer(
    program: &Program,
    opts: &PrintOptions,
    writer: &mut (impl Write + ?Sized),
) -> Result<()> {
    let mut printer = Printer::new(opts, writer);
    printer.print_program(program)
}

struct Printer<'a, W: Write + ?Sized> {
    opts: &'a PrintOptions,
    writer: &'a mut W,
    depth: usize,
}

impl<'a, W: Write + ?Sized> Printer<'a, W> {
    fn new(opts: &'a PrintOptions, writer: &'a mut W) -> Self {
        Self {
            opts,
            writer,
            depth: 0,
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }

    fn span(&self, span: &Span) -> String {
        if self.opts.show_spans {
            format!(" @{}:{}", span.line, span.column)
        } else {
            String::new()
        }
    }

    fn print_program(&mut self, program: &Program) -> Result<()> {
        match self.opts.mode {
            PrintMode::Summary => self.print_summary(program),
            PrintMode::Verbose => self.print_verbose(program),
        }
    }

    fn print_summary(&mut self, program: &Program) -> Result<()> {
        writeln!(self.writer, "AST Summary:")?;
        writeln!(
            self.writer,
            " - Total Procedures: {}",
            program.root_procedures.len()
        )?;
        writeln!(self.writer, "Procedures:")?;
        for &pid in &program.root_procedures {
            let proc = program.procedure(pid);
            let params: Vec<&str> = proc
                .parameters
                .iter()
                .map(|&p| program.parameter(p).name.as_str())
                .collect();
            writeln!(
                self.writer,
                " - {}({}): {} top-level statement{}",
                proc.name,
                params.join(", "),
                proc.body.len(),
                if proc.body.len() == 1 { "" } else { "s" }
            )?;
        }
        Ok(())
    }

    fn print_verbose(&mut self, program: &Program) -> Result<()> {
        writeln!(self.writer, "Program")?;
        self.depth = 1;
        for &pid in &program.root_procedures {
            self.print_procedure(program, pid)?;
        }
        Ok(())
    }

    fn print_procedure(&mut self, program: &Program, pid: ProcedureId) -> Result<()> {
        let proc = program.procedure(pid);
        let params: Vec<&str> = proc
            .parameters
            .iter()
            .map(|&p| program.parameter(p).name.as_str())
            .collect();
        writeln!(
            self.writer,
            "{}Procedure {}({}){}",
            self.indent(),
            proc.name,
            params.join(", "),
            self.span(&proc.span)
        )?;
        self.depth += 1;
        for &sid in &proc.body {
            self.print_statement(program, sid)?;
        }
        self.depth -= 1;
        Ok(())
    }

    fn print_statement(&mut self, program: &Program, sid: StatementId) -> Result<()> {
        let stmt = program.statement(sid);
        let span = self.span(&stmt.span);
        match &stmt.node {
            StatementKind::Assign(a) => {
                let target = if a.target.indexes.is_empty() {
                    a.target.name.clone()
                } else {
                    let idx: Vec<String> = a
                        .target
                        .indexes
                        .iter()
                        .map(|&i| format!("[{}]", program.expr_to_string(i)))
                        .collect();
                    format!("{}{}", a.target.name, idx.join(""))
                };
                writeln!(
                    self.writer,
                    "{}Assign {} <- {}{}",
                    self.indent(),
                    target,
                    program.expr_to_string(a.value),
                    span
                )
            }
            StatementKind::For(f) => {
                let step = match f.step {
                    Some(s) => format!(" step {}", program.expr_to_string(s)),
                    None => String::new(),
                };
                writeln!(
                    self.writer,
                    "{}For {} <- {} to {}{}{}",
                    self.indent(),
                    f.var,
                    program.expr_to_string(f.start),
                    program.expr_to_string(f.end),
                    step,
                    span
                )?;
                self.print_block(program, &f.body)
            }
            StatementKind::While(w) => {
                writeln!(
                    self.writer,
                    "{}While {}{}",
                    self.indent(),
                    program.expr_to_string(w.condition),
                    span
                )?;
                self.print_block(program, &w.body)
            }
            StatementKind::Repeat(r) => {
                writeln!(
                    self.writer,
                    "{}Repeat until {}{}",
                    self.indent(),
                    program.expr_to_string(r.condition),
                    span
                )?;
                self.print_block(program, &r.body)
            }
            StatementKind::If(i) => {
                writeln!(
                    self.writer,
                    "{}If {}{}",
                    self.indent(),
                    program.expr_to_string(i.condition),
                    span
                )?;
                self.print_block(program, &i.then_branch)?;
                if let Some(els) = &i.else_branch {
                    writeln!(self.writer, "{}Else", self.indent())?;
                    self.print_block(program, els)?;
                }
                Ok(())
            }
            StatementKind::Call(c) => {
                let args: Vec<String> =
                    c.args.iter().map(|&a| program.expr_to_string(a)).collect();
                writeln!(
                    self.writer,
                    "{}Call {}({}){}",
                    self.indent(),
                    c.name,
                    args.join(", "),
                    span
                )
            }
            StatementKind::Return(r) => match r.value {
                Some(v) => writeln!(
                    self.writer,
                    "{}Return {}{}",
                    self.indent(),
                    program.expr_to_string(v),
                    span
                ),
                None => writeln!(self.writer, "{}Return{}", self.indent(), span),
            },
            StatementKind::Empty => writeln!(self.writer, "{}Empty{}", self.indent(), span),
        }
    }

    fn print_block(&mut self, program: &Program, body: &[StatementId]) -> Result<()> {
        self.depth += 1;
        for &sid in body {
            self.print_statement(program, sid)?;
        }
        self.depth -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_program;

    #[test]
    fn prints_through_a_trait_object_writer() {
        let program = parse_program("PROCEDURE P(n)\nBEGIN\n    RETURN n\nEND\n").unwrap();
        let mut buf: Vec<u8> = Vec::new();
        let writer: &mut dyn Write = &mut buf;
        print_program_to_writer(&program, &PrintOptions::default(), writer).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Procedure P(n)"), "got {:?}", text);
    }
}
