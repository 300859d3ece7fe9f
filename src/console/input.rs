//! Prompt helpers for the interactive menu.
//!
//! Each helper re-prompts until the input parses and passes its bound check,
//! mirroring the validation the engine applies, so most engine-side
//! rejections are caught before a call is even made.

use crate::errors::Result;
use std::io::{self, Write};

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        // EOF on stdin; bail out instead of spinning on empty reads.
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed").into());
    }
    Ok(line.trim().to_string())
}

/// Reads the main menu choice.
pub fn menu_choice() -> Result<String> {
    read_line("\nChoose an option")
}

/// Reads a non-empty text of at most 100 characters.
pub fn required_text(prompt: &str) -> Result<String> {
    loop {
        let value = read_line(prompt)?;
        if !value.is_empty() && value.chars().count() <= 100 {
            return Ok(value);
        }
        println!("Invalid text. Enter between 1 and 100 characters.");
    }
}

/// Reads a strictly positive integer.
pub fn positive_int(prompt: &str) -> Result<i64> {
    loop {
        if let Ok(value) = read_line(prompt)?.parse::<i64>()
            && value > 0
        {
            return Ok(value);
        }
        println!("Invalid value. Enter a positive whole number.");
    }
}

/// Reads an integer of zero or more.
pub fn non_negative_int(prompt: &str) -> Result<i64> {
    loop {
        if let Ok(value) = read_line(prompt)?.parse::<i64>()
            && value >= 0
        {
            return Ok(value);
        }
        println!("Invalid value. Enter a whole number of zero or more.");
    }
}

/// Reads a finite decimal of zero or more.
pub fn non_negative_decimal(prompt: &str) -> Result<f64> {
    loop {
        if let Ok(value) = read_line(prompt)?.parse::<f64>()
            && value.is_finite()
            && value >= 0.0
        {
            return Ok(value);
        }
        println!("Invalid value. Enter a number of zero or more (e.g. 12.50).");
    }
}

/// Reads a finite decimal strictly above the given floor.
pub fn decimal_above(prompt: &str, floor: f64) -> Result<f64> {
    loop {
        if let Ok(value) = read_line(&format!("{prompt} (above {floor:.2})"))?.parse::<f64>()
            && value.is_finite()
            && value > floor
        {
            return Ok(value);
        }
        println!("Invalid value. Enter a number greater than {floor:.2}.");
    }
}

/// Asks a yes/no question; anything but `y`/`yes` counts as no.
pub fn confirm(prompt: &str) -> Result<bool> {
    let answer = read_line(&format!("{prompt} (y/N)"))?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
