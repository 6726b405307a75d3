use super::{Console, until_end_of_input};
use crate::domain::grade::{self, GradeReport, Mark};
use crate::error::Result;
use std::io::{BufRead, Write};

/// Asks for a subject count and that many marks, then prints the report.
///
/// An unusable subject count ends the program; a bad mark re-prompts the
/// same subject.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    until_end_of_input(collect_and_report(console))
}

fn collect_and_report<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    let subjects = match console.prompt("Enter the number of subjects: ")?.parse::<i64>() {
        Ok(n) if n > 0 => n,
        Ok(_) => return console.say("Number of subjects must be positive!"),
        Err(_) => return console.say("Please enter a valid number!"),
    };

    let mut marks = Vec::new();
    for subject in 1..=subjects {
        let prompt = format!("Enter marks for subject {subject} (out of 100): ");
        loop {
            let Ok(value) = console.prompt(&prompt)?.parse::<f64>() else {
                console.say("Please enter a valid number!")?;
                continue;
            };
            match Mark::new(value) {
                Ok(mark) => {
                    marks.push(mark);
                    break;
                }
                Err(_) => console.say("Marks must be between 0 and 100!")?,
            }
        }
    }

    let report = grade::calculate(&marks)?;
    print_report(console, &report)
}

pub fn print_report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    report: &GradeReport,
) -> Result<()> {
    console.blank()?;
    console.say("--- Results ---")?;
    console.say(format!(
        "Total Marks: {:.2} out of {}",
        report.total,
        report.max_total()
    ))?;
    console.say(format!("Average Percentage: {:.2}%", report.average))?;
    console.say(format!("Grade: {}", report.grade))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::console::testing::{scripted, transcript};

    fn session(input: &str) -> String {
        let mut console = scripted(input);
        run(&mut console).unwrap();
        transcript(console)
    }

    #[test]
    fn test_full_report() {
        let out = session("3\n95\n85\n75\n");
        assert!(out.contains("Enter marks for subject 3 (out of 100): "));
        assert!(out.contains("Total Marks: 255.00 out of 300"));
        assert!(out.contains("Average Percentage: 85.00%"));
        assert!(out.ends_with("Grade: A\n"));
    }

    #[test]
    fn test_bad_marks_reprompt_same_subject() {
        let out = session("1\n101\nninety\n-1\n90\n");
        assert!(out.contains("Marks must be between 0 and 100!"));
        assert!(out.contains("Please enter a valid number!"));
        assert_eq!(out.matches("Enter marks for subject 1").count(), 4);
        assert!(out.ends_with("Grade: A+\n"));
    }

    #[test]
    fn test_non_positive_subject_count_ends_program() {
        let out = session("0\n");
        assert!(out.ends_with("Number of subjects must be positive!\n"));
        assert!(!out.contains("Results"));

        let out = session("-2\n");
        assert!(out.ends_with("Number of subjects must be positive!\n"));
    }

    #[test]
    fn test_non_numeric_subject_count_ends_program() {
        let out = session("many\n");
        assert!(out.ends_with("Please enter a valid number!\n"));
    }

    #[test]
    fn test_end_of_input_before_all_marks() {
        let out = session("2\n50\n");
        assert!(!out.contains("Results"));
    }
}
