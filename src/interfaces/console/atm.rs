use super::{Console, until_end_of_input};
use crate::domain::account::{Account, Balance};
use crate::error::Result;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Runs the ATM menu until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, account: &mut Account) -> Result<()> {
    console.say(format!(
        "Bank account opened with balance: {}",
        account.balance()
    ))?;
    console.blank()?;
    console.say("Welcome to the Console ATM!")?;

    let result = until_end_of_input(menu_loop(console, account));
    console.say("Thank you for using the ATM. Goodbye!")?;
    result
}

fn menu_loop<R: BufRead, W: Write>(console: &mut Console<R, W>, account: &mut Account) -> Result<()> {
    loop {
        console.say("ATM Menu:")?;
        console.say("1. Check Balance")?;
        console.say("2. Deposit")?;
        console.say("3. Withdraw")?;
        console.say("4. Exit")?;

        match console.prompt("Choose an option: ")?.parse::<u32>() {
            Ok(1) => console.say(format!("Your current balance is: {}", account.balance()))?,
            Ok(2) => {
                if let Some(amount) = read_amount(console, "Enter amount to deposit: ")? {
                    match account.deposit(amount) {
                        Ok(balance) => console.say(format!(
                            "Deposit successful! You deposited {}. Your new balance is {}.",
                            Balance::new(amount),
                            balance
                        ))?,
                        Err(e) => console.say(format!("Deposit failed: {e}"))?,
                    }
                }
            }
            Ok(3) => {
                if let Some(amount) = read_amount(console, "Enter amount to withdraw: ")? {
                    match account.withdraw(amount) {
                        Ok(balance) => console.say(format!(
                            "Withdrawal successful! You withdrew {}. Your new balance is {}.",
                            Balance::new(amount),
                            balance
                        ))?,
                        Err(e) => console.say(format!("Withdrawal failed: {e}"))?,
                    }
                }
            }
            Ok(4) => return Ok(()),
            Ok(_) => console.say("Invalid option. Please try again.")?,
            Err(_) => console.say("Invalid input. Please enter a number.")?,
        }
        console.blank()?;
    }
}

fn read_amount<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> Result<Option<Decimal>> {
    let reply = console.prompt(prompt)?;
    match Decimal::from_str(&reply) {
        Ok(amount) => Ok(Some(amount)),
        Err(_) => {
            console.say("Invalid input. Please enter a valid number.")?;
            Ok(None)
        }
    }
}
