//! Line parser and dispatcher for the interactive loop. Each accepted line
//! becomes exactly one session event, handled to completion before the next
//! line is read.

use builder_hub::{vote_key, EventMetadata, EventOutcome, HubEvent, HubSession, BOARD_SCOPE, MAIN_ITEM};
use log::debug;

pub enum Control {
    Continue,
    Quit,
}

pub fn dispatch(session: &mut HubSession, line: &str) -> Control {
    if line.is_empty() {
        return Control::Continue;
    }
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "help" => print_help(),
        "quit" | "exit" => return Control::Quit,
        "show" => print_snapshot(session),
        "board" => print_board(session),
        "newest" => print_newest(session),
        "tab" => handle(session, HubEvent::SwitchTab { tab_id: rest.to_string() }),
        "vote" => {
            // Main content toggle: displayed count is what the snapshot shows.
            let tab = session.current_tab().to_string();
            let displayed = main_displayed_count(session);
            handle(session, HubEvent::ToggleVote { scope: tab, item_id: MAIN_ITEM.to_string(), displayed_count: displayed });
        }
        "voteboard" => match rest.parse::<usize>() {
            Ok(index) if index < session.catalog().board().len() => {
                let displayed = board_displayed_count(session, index);
                handle(
                    session,
                    HubEvent::ToggleVote { scope: BOARD_SCOPE.to_string(), item_id: index.to_string(), displayed_count: displayed },
                );
            }
            _ => println!("usage: voteboard <index> (see `board`)"),
        },
        "comment" => handle(session, HubEvent::PostComment { text: rest.to_string() }),
        "post" => match parse_post(rest) {
            Some((title, content, category)) => handle(session, HubEvent::SubmitPost { title, content, category }),
            None => println!("usage: post <title> | <content> [| <category>]"),
        },
        "addproject" => match parse_project(rest) {
            Some((name, description, status, url, github)) => {
                handle(session, HubEvent::AddProject { name, description, status, url, github })
            }
            None => println!("usage: addproject <name> | <description> [| <status> [| <url> [| <github>]]]"),
        },
        "discuss" => match parse_post(rest) {
            Some((title, content, category)) => handle(session, HubEvent::StartDiscussion { title, content, category }),
            None => println!("usage: discuss <title> | <content> [| <category>]"),
        },
        "projects" => print_projects(session),
        "discussions" => print_discussions(session),
        "login" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [email, password] => {
                handle(session, HubEvent::Login { email: email.to_string(), password: password.to_string() })
            }
            _ => println!("usage: login <email> <password>"),
        },
        "signup" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [name, email, password, confirm] => handle(
                session,
                HubEvent::Signup {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                    confirm_password: confirm.to_string(),
                    // The web form had a terms checkbox; the terminal client
                    // treats running the command as ticking it.
                    agreed_terms: true,
                },
            ),
            _ => println!("usage: signup <name> <email> <password> <confirm>"),
        },
        "logout" => handle(session, HubEvent::Logout),
        other => println!("unknown command {other:?} — try `help`"),
    }
    Control::Continue
}

fn handle(session: &mut HubSession, event: HubEvent) {
    let meta = EventMetadata::now();
    match session.handle(&event, &meta) {
        Ok(EventOutcome::TabSwitched { .. }) => print_snapshot(session),
        Ok(EventOutcome::Ignored) => println!("no such tab — tabs: {}", tab_list(session)),
        Ok(EventOutcome::VoteToggled { key, voted, count }) => {
            let state = if voted { "voted" } else { "not voted" };
            println!("{key}: {count} votes ({state})");
        }
        Ok(outcome) => debug!("[hub-cli] outcome: {outcome:?}"),
        // Already surfaced as a toast by the notifier.
        Err(e) => debug!("[hub-cli] rejected: {e}"),
    }
}

fn parse_post(rest: &str) -> Option<(String, String, String)> {
    let mut parts = rest.splitn(3, '|').map(str::trim);
    let title = parts.next().filter(|t| !t.is_empty())?;
    let content = parts.next().filter(|c| !c.is_empty())?;
    let category = parts.next().unwrap_or("general");
    Some((title.to_string(), content.to_string(), category.to_string()))
}

fn parse_project(rest: &str) -> Option<(String, String, String, String, String)> {
    let mut parts = rest.splitn(5, '|').map(str::trim);
    let name = parts.next().filter(|n| !n.is_empty())?;
    let description = parts.next().filter(|d| !d.is_empty())?;
    let status = parts.next().unwrap_or("in-progress");
    let url = parts.next().unwrap_or_default();
    let github = parts.next().unwrap_or_default();
    Some((name.to_string(), description.to_string(), status.to_string(), url.to_string(), github.to_string()))
}

fn main_displayed_count(session: &HubSession) -> u64 {
    let voted = session.has_voted(&vote_key(session.current_tab(), MAIN_ITEM));
    session.current_content().map(|c| c.base_vote_count).unwrap_or_default() + u64::from(voted)
}

fn board_displayed_count(session: &HubSession, index: usize) -> u64 {
    let voted = session.has_voted(&vote_key(BOARD_SCOPE, &index.to_string()));
    session.catalog().board().get(index).map(|e| e.base_vote_count).unwrap_or_default() + u64::from(voted)
}

fn tab_list(session: &HubSession) -> String {
    session.catalog().tab_ids().collect::<Vec<_>>().join(", ")
}

pub fn print_snapshot(session: &HubSession) {
    session.poll().print(EventMetadata::now().timestamp_ms);
}

fn print_board(session: &HubSession) {
    println!("=== Board ===");
    for (index, entry) in session.catalog().board().iter().enumerate() {
        let voted = if session.has_voted(&vote_key(BOARD_SCOPE, &index.to_string())) { " [voted]" } else { "" };
        println!("{index}. {} — {} ({} votes{voted})", entry.title, entry.author, board_displayed_count(session, index));
    }
}

fn print_projects(session: &HubSession) {
    let now = EventMetadata::now().timestamp_ms;
    for project in session.projects() {
        println!(
            "[{}] {} — {} ({})",
            builder_hub::utils::format_relative(project.created_at, now),
            project.name,
            project.author,
            builder_hub::format_status(&project.status)
        );
    }
}

fn print_discussions(session: &HubSession) {
    let now = EventMetadata::now().timestamp_ms;
    for discussion in session.discussions() {
        println!(
            "[{}] {} — {} ({} replies)",
            builder_hub::utils::format_relative(discussion.created_at, now),
            discussion.title,
            discussion.author,
            discussion.replies
        );
    }
}

fn print_newest(session: &HubSession) {
    let now = EventMetadata::now().timestamp_ms;
    for submission in session.newest() {
        println!(
            "[{}] {} — {}",
            builder_hub::utils::format_relative(submission.created_at, now),
            submission.author,
            submission.title
        );
    }
}

fn print_help() {
    println!("commands:");
    println!("  tab <id>                                switch tab");
    println!("  vote                                    toggle vote on the current tab's content");
    println!("  voteboard <index>                       toggle vote on a board entry");
    println!("  comment <text>                          comment on the current content");
    println!("  post <title> | <content> [| <category>] submit a new post");
    println!("  addproject <name> | <description> [| <status> [| <url> [| <github>]]]");
    println!("  discuss <title> | <content> [| <category>]  start a discussion");
    println!("  login <email> <password>                sign in (mock)");
    println!("  signup <name> <email> <password> <confirm>");
    println!("  logout");
    println!("  show | board | newest | projects | discussions | help | quit");
}
