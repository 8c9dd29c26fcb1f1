use super::*;

fn ids(app: &App) -> Vec<i64> {
    app.issues_for_view().iter().map(|issue| issue.id).collect()
}

fn five_issues() -> Vec<Issue> {
    vec![
        issue(1, "Node pool scale fails", IssueState::Open, &["bug"]),
        issue(2, "Add IPv6 support", IssueState::Open, &["feature"]),
        issue(3, "CNI crash on upgrade", IssueState::Open, &["bug"]),
        issue(4, "Docs typo", IssueState::Closed, &[]),
        issue(5, "Egress gateway", IssueState::Open, &["networking"]),
    ]
}

#[test]
fn new_app_starts_on_empty_table() {
    let app = App::new(Config::default());
    assert_eq!(app.view(), View::Table);
    assert_eq!(app.selected_index(), None);
    assert_eq!(app.input_focus(), InputFocus::None);
    assert!(!app.filters_visible());
}

#[test]
fn loading_issues_selects_first_row() {
    let app = app_with_issues(five_issues());
    assert_eq!(app.selected_index(), Some(0));
    assert_eq!(app.selected_issue().map(|issue| issue.id), Some(1));
}

#[test]
fn state_filter_shows_only_open_issue() {
    let mut app = app_with_issues(vec![
        issue(1, "A", IssueState::Open, &["bug"]),
        issue(2, "B", IssueState::Closed, &[]),
    ]);

    app.on_key(key(KeyCode::Char('f')));
    assert_eq!(app.input_focus(), InputFocus::Filter);
    type_text(&mut app, "state:open");

    assert_eq!(app.filter_text(), "state:open");
    assert_eq!(ids(&app), vec![1]);
}

#[test]
fn narrowing_filter_clamps_selection_to_last_row() {
    let mut app = app_with_issues(five_issues());
    for _ in 0..4 {
        app.on_key(key(KeyCode::Down));
    }
    assert_eq!(app.selected_index(), Some(4));

    app.on_key(key(KeyCode::Char('4')));
    assert_eq!(ids(&app), vec![1, 3]);
    assert_eq!(app.selected_index(), Some(1));

    app.on_key(key(KeyCode::Char('5')));
    assert_eq!(ids(&app), vec![2]);
    assert_eq!(app.selected_index(), Some(0));

    app.on_key(key(KeyCode::Char('6')));
    assert!(ids(&app).is_empty());
    assert_eq!(app.selected_index(), None);
    assert_eq!(app.selected_issue(), None);
}

#[test]
fn selection_stays_within_filtered_set() {
    let mut app = app_with_issues(five_issues());
    app.on_key(key(KeyCode::Up));
    assert_eq!(app.selected_index(), Some(0));

    app.on_key(key(KeyCode::End));
    assert_eq!(app.selected_index(), Some(4));
    app.on_key(key(KeyCode::Down));
    assert_eq!(app.selected_index(), Some(4));

    app.on_key(key(KeyCode::Home));
    assert_eq!(app.selected_index(), Some(0));
    app.on_key(key(KeyCode::PageDown));
    assert_eq!(app.selected_index(), Some(4));
}

#[test]
fn quick_filter_toggles_and_replaces() {
    let mut app = app_with_issues(five_issues());

    app.on_key(key(KeyCode::Char('2')));
    assert_eq!(app.active_quick_filter(), Some(1));
    assert_eq!(app.filter_text(), QUICK_FILTERS[1].query);
    assert_eq!(ids(&app), vec![1, 2, 3, 5]);

    app.on_key(key(KeyCode::Char('2')));
    assert_eq!(app.active_quick_filter(), None);
    assert_eq!(app.filter_text(), "");
    assert_eq!(ids(&app).len(), 5);

    app.on_key(key(KeyCode::Char('2')));
    app.on_key(key(KeyCode::Char('4')));
    assert_eq!(app.active_quick_filter(), Some(3));
    assert_eq!(app.filter_text(), "label:bug");
}

#[test]
fn quick_filter_overwrites_typed_filter_text() {
    let mut app = app_with_issues(five_issues());
    app.on_key(key(KeyCode::Char('f')));
    type_text(&mut app, "repo:azure");
    app.on_key(key(KeyCode::Enter));
    app.on_key(key(KeyCode::Char('f')));
    assert!(!app.filters_visible());

    app.on_key(key(KeyCode::Char('4')));
    assert_eq!(app.filter_text(), "label:bug");
}

#[test]
fn recent_preset_matches_everything() {
    let mut app = app_with_issues(five_issues());
    app.on_key(key(KeyCode::Char('3')));
    assert_eq!(app.active_quick_filter(), Some(2));
    assert_eq!(ids(&app).len(), 5);
}

#[test]
fn my_issues_preset_uses_configured_viewer() {
    let config = Config {
        viewer: Some("octocat".to_string()),
        ..Config::default()
    };
    let mut app = App::new(config);
    let mut mine = issue(1, "Mine", IssueState::Open, &[]);
    mine.assignee = Some("octocat".to_string());
    let mut theirs = issue(2, "Theirs", IssueState::Open, &[]);
    theirs.assignee = Some("hubot".to_string());
    app.set_issues(vec![mine, theirs]);

    app.on_key(key(KeyCode::Char('1')));
    assert_eq!(ids(&app), vec![1]);
}

#[test]
fn tab_cycles_focus_only_while_overlay_is_open() {
    let mut app = app_with_issues(five_issues());
    app.on_key(key(KeyCode::Tab));
    assert_eq!(app.input_focus(), InputFocus::None);

    app.on_key(key(KeyCode::Char('f')));
    assert_eq!(app.input_focus(), InputFocus::Filter);
    app.on_key(key(KeyCode::Tab));
    assert_eq!(app.input_focus(), InputFocus::Search);
    app.on_key(key(KeyCode::Tab));
    assert_eq!(app.input_focus(), InputFocus::Filter);
}

#[test]
fn focused_input_swallows_navigation_and_command_keys() {
    let mut app = app_with_issues(five_issues());
    app.on_key(key(KeyCode::Char('s')));
    assert_eq!(app.input_focus(), InputFocus::Search);

    app.on_key(key(KeyCode::Char('q')));
    app.on_key(key(KeyCode::Down));
    app.on_key(key(KeyCode::Char('2')));

    assert!(!app.should_quit());
    assert_eq!(app.search_text(), "q2");
    assert_eq!(app.selected_index(), None);
    assert_eq!(app.active_quick_filter(), None);

    app.on_key(key(KeyCode::Enter));
    assert_eq!(app.input_focus(), InputFocus::None);
    assert_eq!(app.view(), View::Table);
}

#[test]
fn backspace_and_ctrl_u_edit_focused_input() {
    let mut app = app_with_issues(five_issues());
    app.on_key(key(KeyCode::Char('s')));
    type_text(&mut app, "crash");
    assert_eq!(ids(&app), vec![3]);

    app.on_key(key(KeyCode::Backspace));
    assert_eq!(app.search_text(), "cras");
    app.on_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    assert_eq!(app.search_text(), "");
    assert_eq!(ids(&app).len(), 5);
    assert_eq!(app.selected_index(), Some(0));
}

#[test]
fn search_and_filter_apply_together() {
    let mut app = app_with_issues(five_issues());
    app.on_key(key(KeyCode::Char('s')));
    type_text(&mut app, "a");
    app.on_key(key(KeyCode::Enter));
    app.on_key(key(KeyCode::Char('4')));

    for issue in app.issues_for_view() {
        assert!(issue.labels.contains(&"bug".to_string()));
    }
    assert_eq!(ids(&app), vec![1, 3]);
}

#[test]
fn escape_unwinds_one_level_per_press() {
    let mut app = app_with_issues(five_issues());

    app.on_key(key(KeyCode::Char('f')));
    app.on_key(key(KeyCode::Esc));
    assert!(!app.filters_visible());
    assert_eq!(app.input_focus(), InputFocus::None);

    app.on_key(key(KeyCode::Char('s')));
    app.on_key(key(KeyCode::Esc));
    assert_eq!(app.input_focus(), InputFocus::None);

    app.on_key(key(KeyCode::Down));
    app.on_key(key(KeyCode::Enter));
    assert_eq!(app.view(), View::Detail);
    assert_eq!(app.opened_issue().map(|issue| issue.id), Some(2));

    app.on_key(key(KeyCode::Esc));
    assert_eq!(app.view(), View::Table);
    assert_eq!(app.opened_issue(), None);
    assert_eq!(app.selected_index(), Some(1));
}

#[test]
fn escape_with_overlay_open_does_not_leave_table() {
    let mut app = app_with_issues(five_issues());
    app.on_key(key(KeyCode::Char('f')));
    app.on_key(key(KeyCode::Tab));
    app.on_key(key(KeyCode::Esc));
    assert_eq!(app.view(), View::Table);
    assert!(!app.filters_visible());
    assert_eq!(app.input_focus(), InputFocus::None);
}

#[test]
fn enter_on_empty_set_is_ignored() {
    let mut app = App::new(Config::default());
    app.on_key(key(KeyCode::Enter));
    assert_eq!(app.view(), View::Table);
    assert_eq!(app.opened_issue(), None);

    let mut app = app_with_issues(five_issues());
    app.on_key(key(KeyCode::Char('6')));
    app.on_key(key(KeyCode::Enter));
    assert_eq!(app.view(), View::Table);
}

#[test]
fn mouse_events_are_ignored() {
    let mut app = app_with_issues(five_issues());
    let work = app.handle_event(AppEvent::Mouse);
    assert!(work.is_empty());
    assert_eq!(app.selected_index(), Some(0));
}

#[test]
fn quit_keys_stop_the_app() {
    let mut app = App::new(Config::default());
    app.on_key(key(KeyCode::Char('q')));
    assert!(app.should_quit());

    let mut app = App::new(Config::default());
    app.on_key(key(KeyCode::Char('s')));
    app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}
