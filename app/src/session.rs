use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::*;

use crate::config::{Config, MenuConfig};
use crate::menu::{Course, CourseSelection, ValidationError};
use crate::services::{AddMenuItem, AveragePrices, Commandable, Queryable, ShowMenu};
use crate::{views, MenuCard};

const HELP: &str = "\
Commands:
  add <dish> | <description> | <course> | <price>
  list
  averages
  filter [all|Starters|Mains|Dessert]
  export
  help
  quit
";

const REJECTED: &str = "Please enter valid dish name, description, and numeric price.";

/// Drives a `MenuCard` from text commands, one per line.
pub struct Session<W> {
    card: MenuCard,
    menu: MenuConfig,
    selection: CourseSelection,
    out: W,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl<W: Write> Session<W> {
    pub fn new(config: &Config, out: W) -> Self {
        let card = MenuCard::new(config);
        let menu = config.menu.clone();
        let selection = CourseSelection::new();
        Session {
            card,
            menu,
            selection,
            out,
        }
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line.context("read command")?;
            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
        }
        self.out.flush().context("flush output")?;
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let (cmd, rest) = match line.find(char::is_whitespace) {
            Some(at) => (&line[..at], line[at..].trim()),
            None => (line, ""),
        };
        debug!("Command {:?} with {:?}", cmd, rest);

        match cmd {
            "add" => self.add(rest)?,
            "list" => {
                let text = views::home(&self.menu, self.card.menu());
                self.write(&text)?;
            }
            "averages" => {
                let averages = self.card.query(AveragePrices)?;
                let text = views::averages(&self.menu, &averages);
                self.write(&text)?;
            }
            "filter" => self.filter(rest)?,
            "export" => {
                let items = self.card.query(ShowMenu)?;
                let json = serde_json::to_string_pretty(&items).context("encode menu")?;
                self.write(&json)?;
                self.write("\n")?;
            }
            "help" => self.write(HELP)?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => {
                warn!("Unknown command: {:?}", other);
                self.write(&format!("Unknown command: {} (try `help`)\n", other))?;
            }
        }
        Ok(Flow::Continue)
    }

    pub fn card(&self) -> &MenuCard {
        &self.card
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn add(&mut self, args: &str) -> Result<()> {
        let fields = args.split('|').map(str::trim).collect::<Vec<_>>();
        let (dish_name, description, course, price) = match fields.as_slice() {
            [dish_name, description, course, price] => (dish_name, description, course, price),
            _ => {
                return self.write("Usage: add <dish> | <description> | <course> | <price>\n");
            }
        };
        let req = AddMenuItem {
            dish_name: dish_name.to_string(),
            description: description.to_string(),
            course: course.to_string(),
            price: price.to_string(),
        };

        match self.card.execute(req) {
            Ok(id) => self.write(&format!("Added {}\n", id)),
            Err(e) => match e.downcast_ref::<ValidationError>() {
                Some(reason) => self.write(&format!("{} ({})\n", REJECTED, reason)),
                None => Err(e),
            },
        }
    }

    fn filter(&mut self, args: &str) -> Result<()> {
        match args {
            "" => {}
            "all" | "All" => self.selection.select_all(),
            name => match name.parse::<Course>() {
                Ok(course) => self.selection.select_course(course),
                Err(e) => return self.write(&format!("{}\n", e)),
            },
        }
        let text = views::filtered(&self.menu, &self.selection, self.card.menu().list());
        self.write(&text)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .context("write output")?;
        Ok(())
    }
}
