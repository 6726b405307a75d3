use super::{Console, until_end_of_input};
use crate::application::converter::CurrencyConverter;
use crate::domain::currency::{self, CATALOG, CurrencyCode};
use crate::error::Result;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Base currency whose rates are loaded before the first menu is shown.
pub const PRELOAD_BASE: &str = "USD";

pub async fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    converter: &mut CurrencyConverter,
) -> Result<()> {
    console.blank()?;
    console.say("Welcome to the Console Currency Converter!")?;

    let preload = CurrencyCode::parse(PRELOAD_BASE)?;
    console.say(format!("Fetching exchange rates for {preload}..."))?;
    match converter.load_rates(&preload).await {
        Ok(_) => console.say(format!("Exchange rates fetched successfully for {preload}."))?,
        Err(e) => console.say(format!("Error fetching exchange rates: {e}"))?,
    }

    let result = until_end_of_input(menu_loop(console, converter).await);
    console.say("Thank you for using the Currency Converter. Goodbye!")?;
    result
}

async fn menu_loop<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    converter: &mut CurrencyConverter,
) -> Result<()> {
    loop {
        console.blank()?;
        console.say("Currency Converter Menu:")?;
        console.say("1. Convert Currency")?;
        console.say("2. List Available Currencies")?;
        console.say("3. Exit")?;

        match console.prompt("Choose an option: ")?.parse::<u32>() {
            Ok(1) => perform_conversion(console, converter).await?,
            Ok(2) => list_currencies(console)?,
            Ok(3) => return Ok(()),
            Ok(_) => console.say("Invalid option. Please try again.")?,
            Err(_) => console.say("Invalid input. Please enter a number.")?,
        }
    }
}

async fn perform_conversion<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    converter: &mut CurrencyConverter,
) -> Result<()> {
    console.blank()?;
    console.say("--- Currency Conversion ---")?;
    list_currencies(console)?;

    let base = loop {
        if let Some(code) = read_currency(console, "Enter base currency code (e.g., USD): ")? {
            break code;
        }
    };
    let target = loop {
        match read_currency(console, "Enter target currency code (e.g., EUR): ")? {
            Some(code) if code == base => console.say(
                "Base and target currencies cannot be the same. Please choose a different target currency.",
            )?,
            Some(code) => break code,
            None => {}
        }
    };
    let amount = loop {
        let reply = console.prompt("Enter amount to convert: ")?;
        match Decimal::from_str(&reply) {
            Ok(amount) if amount > Decimal::ZERO => break amount,
            Ok(_) => console.say("Amount must be positive.")?,
            Err(_) => console.say("Invalid input. Please enter a valid number.")?,
        }
    };

    if converter.current_base() != Some(&base) {
        console.say(format!("Fetching exchange rates for {base}..."))?;
    }
    match converter.convert(amount, &base, &target).await {
        Ok(conversion) => console.say(format!("Result: {conversion}")),
        Err(e) => console.say(format!("Conversion failed: {e}")),
    }
}

/// Reads a code and accepts it only if it is in the catalog.
fn read_currency<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> Result<Option<CurrencyCode>> {
    let reply = console.prompt(prompt)?;
    match CurrencyCode::parse(&reply) {
        Ok(code) if currency::lookup(&code).is_some() => Ok(Some(code)),
        _ => {
            console.say("Invalid currency code. Please choose from the list (e.g., USD, EUR).")?;
            Ok(None)
        }
    }
}

fn list_currencies<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.blank()?;
    console.say("--- Available Currencies ---")?;
    for currency in CATALOG {
        console.say(currency)?;
    }
    console.say("----------------------------")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryRateSource;
    use crate::interfaces::console::testing::{scripted, transcript};
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn source() -> InMemoryRateSource {
        InMemoryRateSource::new()
            .with_rates(code("USD"), [(code("EUR"), dec!(0.9)), (code("JPY"), dec!(150))])
            .with_rates(code("GBP"), [(code("USD"), dec!(1.25))])
    }

    async fn session(input: &str, source: InMemoryRateSource) -> String {
        let mut console = scripted(input);
        let mut converter = CurrencyConverter::new(Box::new(source));
        run(&mut console, &mut converter).await.unwrap();
        transcript(console)
    }

    #[tokio::test]
    async fn test_convert_with_preloaded_rates() {
        let rates = source();
        let out = session("1\nusd\neur\n100\n3\n", rates.clone()).await;

        assert!(out.contains("Exchange rates fetched successfully for USD."));
        assert!(out.contains("Result: 100.00 USD = € 90.00 EUR"));
        assert_eq!(out.matches("Fetching exchange rates for USD...").count(), 1);
        assert!(out.ends_with("Thank you for using the Currency Converter. Goodbye!\n"));
        assert_eq!(rates.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_switching_base_refetches() {
        let rates = source();
        let out = session("1\nGBP\nUSD\n10\n3\n", rates.clone()).await;

        assert!(out.contains("Fetching exchange rates for GBP..."));
        assert!(out.contains("Result: 10.00 GBP = $ 12.50 USD"));
        assert_eq!(rates.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_reprompts_invalid_selections() {
        let out = session("1\nXYZ\nUSD\nUSD\nEUR\nabc\n-4\n0\n2\n3\n", source()).await;

        assert!(out.contains("Invalid currency code. Please choose from the list (e.g., USD, EUR)."));
        assert!(out.contains("Base and target currencies cannot be the same."));
        assert!(out.contains("Invalid input. Please enter a valid number."));
        assert!(out.contains("Amount must be positive."));
        assert!(out.contains("Result: 2.00 USD = € 1.80 EUR"));
    }

    #[tokio::test]
    async fn test_missing_rate_reports_failure() {
        let out = session("1\nUSD\nCHF\n5\n3\n", source()).await;
        assert!(out.contains("Conversion failed: Exchange rate for CHF not found"));
    }

    #[tokio::test]
    async fn test_huge_amount_reports_failure() {
        let out = session("1\nUSD\nJPY\n79228162514264337593543950335\n3\n", source()).await;
        assert!(out.contains("Conversion failed: Amount too large"));
        assert!(out.ends_with("Thank you for using the Currency Converter. Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_result_rounds_to_cents() {
        let rates = InMemoryRateSource::new().with_rates(code("USD"), [(code("EUR"), dec!(0.919))]);
        let out = session("1\nUSD\nEUR\n1\n3\n", rates).await;
        assert!(out.contains("Result: 1.00 USD = € 0.92 EUR"));
    }

    #[tokio::test]
    async fn test_preload_failure_is_not_fatal() {
        let out = session("2\n3\n", InMemoryRateSource::new()).await;

        assert!(out.contains("Error fetching exchange rates: Failed to fetch exchange rates"));
        assert!(out.contains("USD - United States Dollar ($)"));
        assert!(out.contains("ZAR - South African Rand (R)"));
    }

    #[tokio::test]
    async fn test_invalid_menu_choice() {
        let out = session("x\n7\n3\n", source()).await;
        assert!(out.contains("Invalid input. Please enter a number."));
        assert!(out.contains("Invalid option. Please try again."));
    }
}
