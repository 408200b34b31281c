//! Line-oriented interactive session over one in-memory [`AppState`].

use std::io::{self, BufRead, Write};

use goalpath_core::checkin::{mood_label, progress_label};
use goalpath_core::{
    AppState, Config, ConfiguredMentor, ConfiguredTaskGenerator, GoalDraft, Mentor, MentorChat,
    MentorConversation, QuizSession, TaskGenerator,
};

use super::{quiz, CommandResult};

const HELP: &str = "\
Commands:
  goal <title> [| description | target date | milestone, milestone]
  reset                          drop the current goal and its tasks
  tasks                          list today's tasks
  toggle <id>                    mark a task done or not done
  milestones                     list milestones
  milestone <id>                 mark a milestone done or not done
  checkin <mood 1-5> <progress 1-5> [notes]
  progress                       progress summary
  weekly                         last 7 days of activity
  chat <message>                 talk to your mentor
  quiz                           take the quiz
  help                           show this help
  quit                           leave the session";

#[derive(Debug, PartialEq)]
enum Command {
    Goal(GoalDraft),
    Reset,
    Tasks,
    Toggle(String),
    Milestones,
    Milestone(String),
    CheckIn { mood: u8, progress: u8, notes: String },
    Progress,
    Weekly,
    Chat(String),
    Quiz,
    Help,
    Quit,
}

fn parse_goal(args: &str) -> Result<GoalDraft, String> {
    let mut parts = args.split('|').map(str::trim);
    let title = parts.next().unwrap_or_default();
    if title.is_empty() {
        return Err("usage: goal <title> [| description | target date | milestones]".into());
    }

    let mut draft = GoalDraft::new(title);
    if let Some(description) = parts.next() {
        draft = draft.description(description);
    }
    if let Some(target) = parts.next() {
        draft = draft.target_date(target);
    }
    if let Some(milestones) = parts.next() {
        draft = draft.milestones(milestones.split(','));
    }
    Ok(draft)
}

fn parse_level(value: Option<&str>, what: &str) -> Result<u8, String> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("{what} must be a number from 1 to 5"))
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let required = |usage: &str| {
        if rest.is_empty() {
            Err(format!("usage: {usage}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match name.to_lowercase().as_str() {
        "goal" => Command::Goal(parse_goal(rest)?),
        "reset" => Command::Reset,
        "tasks" => Command::Tasks,
        "toggle" => Command::Toggle(required("toggle <id>")?),
        "milestones" => Command::Milestones,
        "milestone" => Command::Milestone(required("milestone <id>")?),
        "checkin" => {
            let mut words = rest.splitn(3, char::is_whitespace);
            let mood = parse_level(words.next(), "mood")?;
            let progress = parse_level(words.next(), "progress")?;
            let notes = words.next().unwrap_or_default().trim().to_string();
            Command::CheckIn {
                mood,
                progress,
                notes,
            }
        }
        "progress" => Command::Progress,
        "weekly" => Command::Weekly,
        "chat" => Command::Chat(required("chat <message>")?),
        "quiz" => Command::Quiz,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };
    Ok(Some(command))
}

/// One user's session: state, collaborators and the running conversation.
pub struct Session<G, M> {
    state: AppState,
    generator: G,
    mentor: Mentor<M>,
    conversation: MentorConversation,
}

impl<G: TaskGenerator, M: MentorChat> Session<G, M> {
    pub fn new(state: AppState, generator: G, mentor: Mentor<M>) -> Self {
        Self {
            state,
            generator,
            mentor,
            conversation: MentorConversation::new("", ""),
        }
    }

    /// Read commands from `input` until `quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        writeln!(out, "GoalPath session. Type 'help' for commands.")?;
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            match parse_command(&line) {
                Ok(Some(Command::Quit)) => return Ok(()),
                Ok(Some(command)) => self.execute(command, input, out).await?,
                Ok(None) => {}
                Err(message) => writeln!(out, "{message}")?,
            }
        }
    }

    async fn execute<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        match command {
            Command::Goal(draft) => {
                writeln!(out, "Generating tasks for \"{}\"...", draft.title)?;
                self.conversation = MentorConversation::new(&draft.title, &draft.description);
                self.state.create_goal(draft, &self.generator).await;
                self.print_tasks(out)?;
            }
            Command::Reset => {
                self.state.reset_goal();
                self.conversation = MentorConversation::new("", "");
                writeln!(out, "Goal cleared.")?;
            }
            Command::Tasks => self.print_tasks(out)?,
            Command::Toggle(id) => {
                if self.state.toggle_task(&id) {
                    self.print_tasks(out)?;
                } else {
                    writeln!(out, "No task with id {id}")?;
                }
            }
            Command::Milestones => self.print_milestones(out)?,
            Command::Milestone(id) => {
                if self.state.toggle_milestone(&id) {
                    self.print_milestones(out)?;
                } else {
                    writeln!(out, "No milestone with id {id}")?;
                }
            }
            Command::CheckIn {
                mood,
                progress,
                notes,
            } => match self.state.check_in(mood, progress, notes) {
                Ok(()) => writeln!(
                    out,
                    "Checked in: mood {}, progress {}",
                    mood_label(mood).unwrap_or_default(),
                    progress_label(progress).unwrap_or_default()
                )?,
                Err(e) => writeln!(out, "{e}")?,
            },
            Command::Progress => self.print_progress(out)?,
            Command::Weekly => self.print_weekly(out)?,
            Command::Chat(message) => {
                if let Some(reply) = self.conversation.send(&self.mentor, &message).await {
                    writeln!(out, "{reply}")?;
                }
            }
            Command::Quiz => quiz::play(&mut QuizSession::default(), input, out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn print_tasks<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let tasks = self.state.todays_tasks();
        if tasks.is_empty() {
            return writeln!(out, "No tasks for today. Set a goal with 'goal <title>'.");
        }
        for task in tasks {
            let mark = if task.completed { 'x' } else { ' ' };
            writeln!(
                out,
                "[{mark}] {}. {} ({}, {})",
                task.id, task.title, task.category, task.duration
            )?;
        }
        let today = self.state.todays_progress();
        writeln!(
            out,
            "{}/{} done ({}%)",
            today.completed, today.total, today.percentage
        )
    }

    fn print_milestones<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let milestones = self
            .state
            .goal()
            .map(|g| g.milestones.as_slice())
            .unwrap_or_default();
        if milestones.is_empty() {
            return writeln!(out, "No milestones.");
        }
        for milestone in milestones {
            let mark = if milestone.completed { 'x' } else { ' ' };
            writeln!(out, "[{mark}] {}. {}", milestone.id, milestone.title)?;
        }
        Ok(())
    }

    fn print_progress<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let snapshot = self.state.snapshot();
        if let Some(title) = &snapshot.goal_title {
            writeln!(out, "Goal: {title}")?;
        }
        writeln!(out, "Overall progress: {}%", snapshot.overall)?;
        writeln!(
            out,
            "Milestones: {}/{} ({}%)",
            snapshot.milestones.completed, snapshot.milestones.total, snapshot.milestones.percentage
        )?;
        writeln!(
            out,
            "Today's tasks: {}/{} ({}%)",
            snapshot.today.completed, snapshot.today.total, snapshot.today.percentage
        )?;
        writeln!(out, "Day streak: {}", snapshot.streak)?;
        writeln!(out, "Tasks done: {}", snapshot.tasks_done)?;
        writeln!(out, "Check-ins: {}", snapshot.check_ins)
    }

    fn print_weekly<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for day in self.state.weekly_activity() {
            let marker = if day.is_today { " <- today" } else { "" };
            writeln!(out, "{} {:>4}{marker}", day.day_name, day.label())?;
        }
        Ok(())
    }
}

pub async fn run() -> CommandResult {
    let config = Config::load_or_default();
    tracing::debug!(ai_configured = config.ai.is_configured(), "starting session");
    let mut session = Session::new(
        AppState::from_config(&config),
        ConfiguredTaskGenerator::from_config(&config.ai),
        Mentor::from_config(ConfiguredMentor::from_config(&config.ai), &config.ai),
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(&mut stdin.lock(), &mut stdout.lock()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use goalpath_core::ai::{CannedMentor, TemplateTaskGenerator};
    use goalpath_core::FixedClock;

    fn session() -> Session<TemplateTaskGenerator, CannedMentor> {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        Session::new(
            AppState::with_clock(clock),
            TemplateTaskGenerator,
            Mentor::new(CannedMentor),
        )
    }

    async fn run_script(session: &mut Session<TemplateTaskGenerator, CannedMentor>, script: &str) -> String {
        let mut out = Vec::new();
        session.run(&mut script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_goal_with_all_parts() {
        let command = parse_command("goal Learn Piano | Classical | 2026-12-31 | Scales, , Chords").unwrap();
        let expected = GoalDraft::new("Learn Piano")
            .description("Classical")
            .target_date("2026-12-31")
            .milestones(["Scales", " ", " Chords"]);
        assert_eq!(command, Some(Command::Goal(expected)));
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(parse_command("goal").is_err());
        assert!(parse_command("toggle").is_err());
        assert!(parse_command("checkin five 3").is_err());
        assert!(parse_command("dance").is_err());
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn parses_checkin_notes() {
        assert_eq!(
            parse_command("checkin 4 2 long day, still practiced"),
            Ok(Some(Command::CheckIn {
                mood: 4,
                progress: 2,
                notes: "long day, still practiced".into(),
            }))
        );
    }

    #[tokio::test]
    async fn goal_toggle_and_progress() {
        let mut session = session();
        let out = run_script(
            &mut session,
            "goal Learn Spanish | | | Basics, Travel\ntoggle 1\nmilestone 2\nprogress\nquit\n",
        )
        .await;

        assert!(out.contains("[x] 1. Learn 15 new vocabulary words"));
        assert!(out.contains("1/5 done (20%)"));
        assert!(out.contains("[x] 2. Travel"));
        // round(50 * 0.6 + 20 * 0.4)
        assert!(out.contains("Overall progress: 38%"));
        assert!(out.contains("Day streak: 1"));
    }

    #[tokio::test]
    async fn checkin_validation_is_reported() {
        let mut session = session();
        let out = run_script(&mut session, "checkin 6 3\ncheckin 5 3 great\n").await;
        assert!(out.contains("outside 1..=5"));
        assert!(out.contains("Checked in: mood Amazing, progress Moderate"));
        assert_eq!(session.state.check_ins().len(), 1);
    }

    #[tokio::test]
    async fn chat_uses_goal_title() {
        let mut session = session();
        let out = run_script(&mut session, "goal Chess\nchat hello\n").await;
        assert!(out.contains("Great to see you working on Chess!"));
    }

    #[tokio::test]
    async fn unknown_ids_are_reported() {
        let mut session = session();
        let out = run_script(&mut session, "toggle 3\nmilestone 1\n").await;
        assert!(out.contains("No task with id 3"));
        assert!(out.contains("No milestone with id 1"));
    }
}
