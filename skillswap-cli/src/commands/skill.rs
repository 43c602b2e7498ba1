//! Skill commands - the skills you offer and want

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use skillswap_core::{NewSkill, Skill, SkillKind};

use super::{get_context, require_user};
use crate::output;

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Offered,
    Wanted,
}

impl From<KindArg> for SkillKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Offered => SkillKind::Offered,
            KindArg::Wanted => SkillKind::Wanted,
        }
    }
}

#[derive(Subcommand)]
pub enum SkillCommands {
    /// Add a skill
    Add {
        kind: KindArg,
        name: String,
        /// What you can teach or want to learn
        #[arg(long, short)]
        description: String,
        #[arg(long)]
        category: Option<String>,
        /// beginner, intermediate, advanced or expert
        #[arg(long)]
        level: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a skill by id
    Remove { kind: KindArg, id: String },
    /// List your skills
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl SkillCommands {
    pub fn name(&self) -> &'static str {
        match self {
            SkillCommands::Add { .. } => "skill add",
            SkillCommands::Remove { .. } => "skill remove",
            SkillCommands::List { .. } => "skill list",
        }
    }
}

pub fn run(command: SkillCommands) -> Result<()> {
    let ctx = get_context()?;
    match command {
        SkillCommands::Add {
            kind,
            name,
            description,
            category,
            level,
            json,
        } => {
            let new_skill = NewSkill {
                name,
                description,
                category,
                level,
            };
            let skill = ctx.session.add_skill(kind.into(), &new_skill)?;
            if json {
                return output::print_json(&skill);
            }
            output::success(&format!(
                "Added {} skill {} ({})",
                SkillKind::from(kind).as_str(),
                output::skill_label(&skill),
                skill.id
            ));
        }
        SkillCommands::Remove { kind, id } => {
            ctx.session.remove_skill(kind.into(), &id)?;
            output::success(&format!("Removed skill {}", id));
        }
        SkillCommands::List { json } => {
            let user = require_user(&ctx)?;
            if json {
                return output::print_json(&serde_json::json!({
                    "offered": user.skills_offered,
                    "wanted": user.skills_wanted,
                }));
            }
            print_skills("Offered", &user.skills_offered);
            println!();
            print_skills("Wanted", &user.skills_wanted);
        }
    }
    Ok(())
}

fn print_skills(title: &str, skills: &[Skill]) {
    println!("{}", title.bold());
    if skills.is_empty() {
        println!("  {}", "none yet".dimmed());
        return;
    }
    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Level", "Category", "Description"]);
    for skill in skills {
        table.add_row(vec![
            skill.id.clone(),
            skill.name.clone(),
            skill.level.clone().unwrap_or_default(),
            skill.category.clone().unwrap_or_default(),
            skill.description.clone(),
        ]);
    }
    println!("{}", table);
}
