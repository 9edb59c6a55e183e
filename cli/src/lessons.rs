use std::io::Write;

use anyhow::{Result, bail};
use zenbench_scenarios::narrative::{self, LESSONS, Lesson, MEASURE_FIRST};

fn indent<W: Write>(out: &mut W, code: &str) -> Result<()> {
    for line in code.lines() {
        writeln!(out, "    {}", line)?;
    }
    Ok(())
}

fn write_lesson<W: Write>(out: &mut W, lesson: &Lesson) -> Result<()> {
    writeln!(out, "## {} ({})", lesson.title, lesson.topic)?;
    if let Some(scenario) = lesson.scenario {
        writeln!(out, "timed by: zenbench run --only {}", scenario)?;
    }
    writeln!(out, "before:")?;
    indent(out, lesson.before)?;
    writeln!(out, "after:")?;
    indent(out, lesson.after)?;
    writeln!(out, "{}\n", lesson.takeaway)?;
    Ok(())
}

pub fn render<W: Write>(out: &mut W, topic: Option<&str>) -> Result<()> {
    match topic {
        Some(topic) => match narrative::lesson(topic) {
            Some(lesson) => write_lesson(out, lesson)?,
            None => {
                let known: Vec<&str> = LESSONS.iter().map(|l| l.topic).collect();
                bail!("Unknown lesson topic '{}'. Known topics: {}", topic, known.join(", "));
            }
        },
        None => {
            for lesson in LESSONS {
                write_lesson(out, lesson)?;
            }
        }
    }
    writeln!(out, "{}", MEASURE_FIRST)?;
    Ok(())
}
