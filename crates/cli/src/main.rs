mod persistence;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use persistence::{default_save_path, load_ledger, save_ledger, LoadedState};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use trashpoker_core::{
    Event, EventBus, GuessDirection, Phase, Powerup, RngState, Table, TableError,
};

const HELP: &str = "\
commands:
  deal <bet>        bet and draw five cards
  pick <idx>...     toggle cards for the discard (0-4)
  discard           replace the picked cards and score
  stand             score the hand as dealt
  mull              redeal the whole hand (mulligan powerup)
  collect           bank a winning hand
  double            take a win into double-or-nothing
  high / low        guess the mystery card
  odds              show high-low odds (master powerup)
  cashout           leave double-or-nothing with the stake
  shop              list powerups and prices
  buy <item>        purchase a powerup by its id
  grab / done       collect trash while broke
  hand              show the current hand
  status            balance, jackpot, and active powerups
  save              write the save file now
  help              this text
  quit              save and exit";

#[derive(Debug, Default)]
struct CliOptions {
    seed: Option<u64>,
    save_path: Option<PathBuf>,
}

fn parse_args() -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                options.seed = Some(value.parse().context("--seed must be a number")?);
            }
            "--save" => {
                let value = args.next().context("--save needs a path")?;
                options.save_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                println!("trashpoker [--seed <n>] [--save <path>]");
                println!("{HELP}");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(options)
}

#[derive(Debug, Default)]
struct Outcome {
    quit: bool,
    show_hand: bool,
}

fn main() -> Result<()> {
    let options = parse_args()?;
    let save_path = options
        .save_path
        .or_else(default_save_path)
        .context("no save path: set $TRASHPOKER_SAVE or $HOME")?;

    let LoadedState { ledger, last_saved } = load_ledger(&save_path);
    if let Some(stamp) = last_saved {
        let hours = (Utc::now() - stamp).num_hours();
        if hours > 0 {
            println!("Welcome back! You last played {hours} hours ago.");
        }
    }

    let rng = match options.seed {
        Some(seed) => RngState::from_seed(seed),
        None => RngState::from_entropy(),
    };
    println!(
        "trashpoker — balance {}gc, jackpot {}gc (seed {})",
        ledger.balance,
        ledger.jackpot,
        rng.seed()
    );
    println!("type 'help' for commands");

    let mut table = Table::new(ledger, rng);
    let mut scavenging = table.ledger.is_broke();
    if scavenging {
        println!("You're out of cash! Time to collect some trash ('grab').");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("[{}] > ", prompt_label(&table, scavenging));
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let mut events = EventBus::default();
        let outcome = dispatch(&mut table, &mut events, &mut scavenging, command, &args);
        drain_events(&mut events, &mut scavenging);
        if outcome.show_hand {
            print_hand(&table);
        }
        if let Err(err) = save_ledger(&table.ledger, &save_path) {
            println!("warning: could not save: {err}");
        }
        if outcome.quit {
            break;
        }
    }

    println!("saved. come back when the jackpot is bigger.");
    Ok(())
}

fn dispatch(
    table: &mut Table,
    events: &mut EventBus,
    scavenging: &mut bool,
    command: &str,
    args: &[&str],
) -> Outcome {
    let mut outcome = Outcome::default();
    if *scavenging
        && !matches!(
            command,
            "grab" | "g" | "done" | "status" | "st" | "save" | "help" | "?" | "quit" | "exit" | "q"
        )
    {
        println!("you're scavenging — 'grab' for cash, 'done' to head back");
        return outcome;
    }
    match command {
        "deal" | "d" => match parse_bet(args) {
            Ok(bet) => match table.deal(bet, events) {
                Ok(()) => outcome.show_hand = true,
                Err(err) => report(err),
            },
            Err(message) => println!("{message}"),
        },
        "pick" | "p" => {
            if args.is_empty() {
                println!("usage: pick <idx> <idx> ...");
            } else {
                for arg in args {
                    match arg.parse::<usize>() {
                        Ok(index) => match table.toggle_select(index) {
                            Ok(true) => println!("card {index} marked for discard"),
                            Ok(false) => println!("card {index} kept"),
                            Err(err) => report(err),
                        },
                        Err(_) => println!("not a card index: {arg}"),
                    }
                }
                outcome.show_hand = table.phase() == Phase::Dealt;
            }
        }
        "discard" | "x" => match table.discard(events) {
            Ok(_) => outcome.show_hand = table.phase() == Phase::Evaluated,
            Err(err) => report(err),
        },
        "stand" | "s" => {
            if let Err(err) = table.stand(events) {
                report(err);
            }
        }
        "mull" | "m" => match table.mulligan(events) {
            Ok(()) => outcome.show_hand = true,
            Err(err) => report(err),
        },
        "collect" | "c" => {
            if let Err(err) = table.collect(events) {
                report(err);
            }
        }
        "double" | "dbl" => match table.enter_double(events) {
            Ok(()) => print_odds(table),
            Err(err) => report(err),
        },
        "high" | "hi" => guess(table, events, GuessDirection::High),
        "low" | "lo" => guess(table, events, GuessDirection::Low),
        "odds" => print_odds_or_complain(table),
        "cashout" | "co" => {
            if let Err(err) = table.cash_out(events) {
                report(err);
            }
        }
        "shop" => print_shop(table),
        "buy" => match args.first().copied().and_then(Powerup::from_id) {
            Some(item) => {
                if let Err(err) = table.buy(item, events) {
                    println!("error: {err}");
                }
            }
            None => {
                println!("usage: buy <item> — one of:");
                for item in Powerup::ALL {
                    println!("  {}", item.id());
                }
            }
        },
        "grab" | "g" => grab(table, scavenging),
        "done" => {
            if *scavenging {
                *scavenging = false;
                println!(
                    "back to the tables with {}gc in hand",
                    table.ledger.balance
                );
            } else {
                println!("nothing to be done");
            }
        }
        "hand" | "h" => print_hand(table),
        "status" | "st" => print_status(table),
        "save" => println!("saving..."),
        "help" | "?" => println!("{HELP}"),
        "quit" | "exit" | "q" => outcome.quit = true,
        other => println!("unknown command: {other} (try 'help')"),
    }
    outcome
}

fn parse_bet(args: &[&str]) -> Result<i64, String> {
    let Some(raw) = args.first() else {
        return Err("usage: deal <bet>".to_string());
    };
    raw.parse::<i64>()
        .map_err(|_| format!("not a bet amount: {raw}"))
}

fn guess(table: &mut Table, events: &mut EventBus, direction: GuessDirection) {
    match table.guess(direction, events) {
        Ok(true) => {
            if table.phase() == Phase::Doubling {
                print_odds(table);
            }
        }
        Ok(false) => {}
        Err(err) => report(err),
    }
}

fn grab(table: &mut Table, scavenging: &mut bool) {
    if !*scavenging {
        println!("the casino floor is clean — nothing to grab");
        return;
    }
    // 1 in 50 finds a rare coin.
    if table.rng.roll(50) {
        table.ledger.balance += 100;
        println!(
            "a rare coin in the trash! +100gc (balance {}gc)",
            table.ledger.balance
        );
    } else {
        table.ledger.balance += 1;
        println!("trash collected, +1gc (balance {}gc)", table.ledger.balance);
    }
}

fn report(err: TableError) {
    // Commands that land mid-animation are dropped without comment.
    if err == TableError::Busy {
        return;
    }
    println!("error: {err}");
}

fn prompt_label(table: &Table, scavenging: bool) -> String {
    if scavenging {
        return format!("trash {}gc", table.ledger.balance);
    }
    match table.phase() {
        Phase::Idle => format!("idle {}gc", table.ledger.balance),
        Phase::Dealt => format!("bet {}gc", table.bet()),
        Phase::Evaluated => format!("win {}gc", table.pending_payout()),
        Phase::Doubling => match table.double_game() {
            Some(game) => format!("double r{} {}gc", game.round, game.stake),
            None => "double".to_string(),
        },
    }
}

fn print_hand(table: &Table) {
    if table.hand().is_empty() {
        println!("no cards on the table");
        return;
    }
    let mut line = String::new();
    for (index, card) in table.hand().iter().enumerate() {
        let marker = if table.selected().contains(&index) {
            "*"
        } else {
            ""
        };
        line.push_str(&format!("  {index}:{card}{marker}"));
    }
    println!("{line}");
}

fn print_status(table: &Table) {
    println!(
        "balance {}gc · jackpot {}gc",
        table.ledger.balance, table.ledger.jackpot
    );
    let p = &table.ledger.powerups;
    if p.wildcards_in_deck > 0 {
        println!("  wild cards in deck: {}", p.wildcards_in_deck);
    }
    if p.passive_income > 0 {
        println!("  passive income: +{}gc per deal", p.passive_income);
    }
    if p.lucky > 0 {
        println!("  lucky charm: {} rounds", p.lucky);
    }
    if p.insurance > 0 {
        println!("  insurance: {} rounds", p.insurance);
    }
    if p.mulligan > 0 {
        println!("  mulligans: {}", p.mulligan);
    }
    if p.jokers_wild > 0 {
        println!("  joker's wild: {} rounds", p.jokers_wild);
    }
    if p.double_or_nothing_master {
        println!("  double-or-nothing master");
    }
    if p.compound_interest > 0 {
        println!("  compound interest: {}%", p.compound_interest);
    }
}

fn print_shop(table: &Table) {
    println!("the shop (buy <item>):");
    for item in Powerup::ALL {
        let owned = item == Powerup::DoubleOrNothingMaster
            && table.ledger.powerups.double_or_nothing_master;
        let price = if owned {
            "owned".to_string()
        } else {
            format!("{}gc", item.price(&table.ledger.powerups))
        };
        println!(
            "  {:<10} {:>7}  {} — {}",
            item.id(),
            price,
            item.display_name(),
            item.description()
        );
    }
}

fn print_odds(table: &Table) {
    if let Some(game) = table.double_game() {
        println!("showing {}", game.shown);
    }
    print_master_odds(table);
}

fn print_odds_or_complain(table: &Table) {
    if table.phase() != Phase::Doubling {
        println!("no double-or-nothing in progress");
        return;
    }
    if !table.ledger.powerups.double_or_nothing_master {
        println!("the master powerup would tell you...");
        return;
    }
    print_odds(table);
}

fn print_master_odds(table: &Table) {
    if let Some(odds) = table.double_odds() {
        println!(
            "  higher {}% · lower {}% · push {}%",
            odds.higher, odds.lower, odds.tie
        );
    }
}

fn format_mult(multiplier: f64) -> String {
    if multiplier.fract() == 0.0 {
        format!("{}", multiplier as i64)
    } else {
        format!("{multiplier}")
    }
}

fn drain_events(events: &mut EventBus, scavenging: &mut bool) {
    for event in events.drain() {
        match event {
            Event::IncomeAccrued {
                interest,
                passive,
                balance,
            } => {
                let mut parts = Vec::new();
                if interest > 0 {
                    parts.push(format!("+{interest}gc interest"));
                }
                if passive > 0 {
                    parts.push(format!("+{passive}gc passive income"));
                }
                println!("{} (balance {balance}gc)", parts.join(", "));
            }
            Event::HandDealt { count } => println!("dealt {count} cards"),
            Event::HandRedealt { mulligans_left } => {
                println!("mulligan! fresh hand ({mulligans_left} left)");
            }
            Event::CardsReplaced { count } => println!("replaced {count} cards"),
            Event::HandScored {
                category,
                multiplier,
                payout,
                wildcards_spent,
            } => {
                let mut line = format!(
                    "{} (x{})",
                    category.display_name(),
                    format_mult(multiplier)
                );
                if payout > 0 {
                    line.push_str(&format!(" — you won {payout}gc!"));
                } else {
                    line.push_str(" — no win this time");
                }
                if wildcards_spent > 0 {
                    line.push_str(&format!(" [used {wildcards_spent} wildcard(s)]"));
                }
                println!("{line}");
            }
            Event::InsuranceRefunded { refund, rounds_left } => {
                println!("insurance pays {refund}gc back ({rounds_left} rounds left)");
            }
            Event::DoubleStarted { stake, shown } => {
                println!("double or nothing: {stake}gc at stake, dealer shows {shown}");
            }
            Event::DoubleResolved {
                round,
                shown,
                mystery,
                won,
                stake,
            } => {
                let verdict = if won { "you win" } else { "you lose" };
                println!("round {round}: {mystery} against {shown} — {verdict} ({stake}gc was at stake)");
            }
            Event::DoubleLost { swallowed, jackpot } => {
                println!("{swallowed}gc swallowed by the jackpot (now {jackpot}gc)");
            }
            Event::JackpotWon { amount, total } => {
                println!("JACKPOT! +{amount}gc — {total}gc heading to your balance");
            }
            Event::DoubleCashedOut { amount, balance } => {
                println!("cashed out {amount}gc (balance {balance}gc)");
            }
            Event::RoundSettled { payout, balance } => {
                if payout > 0 {
                    println!("banked {payout}gc (balance {balance}gc)");
                }
            }
            Event::WentBroke { balance } => {
                *scavenging = true;
                println!(
                    "balance {balance}gc — you're out of cash! time to collect some trash ('grab')"
                );
            }
            Event::PowerupPurchased {
                item,
                cost,
                balance,
            } => {
                println!(
                    "bought {} for {cost}gc (balance {balance}gc)",
                    item.display_name()
                );
            }
        }
    }
}
