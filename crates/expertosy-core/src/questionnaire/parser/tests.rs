use super::*;

fn parse(text: &str, mode: ParseMode) -> Result<Vec<Question>, ParseError> {
    HeuristicParser::new().parse(text, mode)
}

fn option_texts(question: &Question) -> Vec<&str> {
    question.options.iter().map(|o| o.text.as_str()).collect()
}

const RANKING_TEXT: &str = "1. What is your primary concern when choosing between these products?
A) Price and value for money
B) Performance and speed
C) Build quality and durability
D) Brand reputation and support

2. How important is portability vs performance for your needs?
A) Maximum performance, weight not important
B) Balance of both portability and performance
C) Highly portable, moderate performance
D) Ultra-portable, basic performance needs";

#[test]
fn test_single_strict_question() {
    let questions = parse(
        "1. What matters most?\nA) Price\nB) Speed\nC) Battery\nD) Weight",
        ParseMode::Strict,
    )
    .unwrap();

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].prompt, "What matters most?");
    assert_eq!(
        option_texts(&questions[0]),
        vec!["Price", "Speed", "Battery", "Weight"]
    );
}

#[test]
fn test_k_sections_yield_k_questions() {
    let questions = parse(RANKING_TEXT, ParseMode::Strict).unwrap();
    assert_eq!(questions.len(), 2);
    for q in &questions {
        assert_eq!(q.options.len(), 4);
    }
    assert_eq!(
        questions[1].prompt,
        "How important is portability vs performance for your needs?"
    );
    assert_eq!(questions[1].options[3].text, "Ultra-portable, basic performance needs");
}

#[test]
fn test_boilerplate_section_contributes_nothing() {
    let text = format!(
        "{}\n\n3. Thank you for completing the questionnaire! Which option fits?\nA) One\nB) Two\nC) Three\nD) Four",
        RANKING_TEXT
    );
    let questions = parse(&text, ParseMode::Strict).unwrap();
    assert_eq!(questions.len(), 2);
    assert!(questions.iter().all(|q| !q.prompt.contains("Thank you")));
}

#[test]
fn test_section_without_question_mark_is_skipped() {
    let text = "1. Pick a colour\nA) Red\nB) Blue\n\n2. Which size?\nA) Small\nB) Large";
    let questions = parse(text, ParseMode::Loose).unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].prompt, "Which size?");
}

#[test]
fn test_options_with_question_marks_are_dropped() {
    let text = "1. Which size?\nA) Small\nB) Is medium ok?\nC) Large";
    let questions = parse(text, ParseMode::Loose).unwrap();
    assert_eq!(option_texts(&questions[0]), vec!["Small", "Large"]);
    assert!(
        questions[0]
            .options
            .iter()
            .all(|o| !o.text.contains('?'))
    );
}

#[test]
fn test_duplicate_options_collapse() {
    let text = "1. Which size?\nA) Small\nB)   Small  \nC) Large";
    let questions = parse(text, ParseMode::Loose).unwrap();
    assert_eq!(option_texts(&questions[0]), vec!["Small", "Large"]);
}

#[test]
fn test_options_sharing_text_but_not_description_are_kept() {
    let text = "1. Which budget?\nA) Price - under $500\nB) Price - over $1000\nC) Speed\nD) Weight";
    let questions = parse(text, ParseMode::Strict).unwrap();
    let q = &questions[0];
    assert_eq!(option_texts(q), vec!["Price", "Price", "Speed", "Weight"]);
    assert_eq!(q.options[0].description.as_deref(), Some("under $500"));
    assert_eq!(q.options[1].description.as_deref(), Some("over $1000"));
    assert!(q.is_well_formed());
}

#[test]
fn test_duplicate_labels_with_emphasis_collapse() {
    let text = "1. Which size?\nA) **Small** - pocketable\nB) Small - pocketable\nC) Large";
    let questions = parse(text, ParseMode::Loose).unwrap();
    assert_eq!(option_texts(&questions[0]), vec!["Small", "Large"]);
}

#[test]
fn test_strict_mode_skips_wrong_option_counts() {
    let text = "1. Too few?\nA) One\nB) Two\nC) Three\n\n\
                2. Just right?\nA) One\nB) Two\nC) Three\nD) Four\n\n\
                3. Too many?\nA) One\n- B) Two\nC) Three\nD) Four\nA. Five";
    let strict = parse(text, ParseMode::Strict).unwrap();
    assert_eq!(strict.len(), 1);
    assert_eq!(strict[0].prompt, "Just right?");

    let loose = parse(text, ParseMode::Loose).unwrap();
    assert_eq!(loose.len(), 3);
}

#[test]
fn test_options_sorted_by_label_letter() {
    let text = "1. Order?\nC) Third\nA) First\nD) Fourth\nB) Second";
    let questions = parse(text, ParseMode::Strict).unwrap();
    assert_eq!(
        option_texts(&questions[0]),
        vec!["First", "Second", "Third", "Fourth"]
    );
}

#[test]
fn test_repeated_letters_keep_encounter_order() {
    let text = "1. Order?\nB) Beta\nA) Alpha\nA) Another alpha";
    let questions = parse(text, ParseMode::Loose).unwrap();
    assert_eq!(
        option_texts(&questions[0]),
        vec!["Beta", "Alpha", "Another alpha"]
    );
}

#[test]
fn test_markdown_emphasis_and_descriptions() {
    let text = "## **1. What kind of vehicle do you need?**\n\
                - **A)** Compact - easy to park\n\
                - **B)** Sedan: comfortable commuting\n\
                • C) SUV – room for everyone\n\
                - D) **Van**";
    let questions = parse(text, ParseMode::Strict).unwrap();
    let q = &questions[0];
    assert_eq!(q.prompt, "What kind of vehicle do you need?");
    assert_eq!(option_texts(q), vec!["Compact", "Sedan", "SUV", "Van"]);
    assert_eq!(q.options[0].description.as_deref(), Some("easy to park"));
    assert_eq!(q.options[1].description.as_deref(), Some("comfortable commuting"));
    assert_eq!(q.options[2].description.as_deref(), Some("room for everyone"));
    assert_eq!(q.options[3].description, None);
}

#[test]
fn test_longest_question_line_is_prompt() {
    let text = "1. Budget?\nWhat is the most you would spend on this purchase?\nA) Under $500\nB) Over $500";
    let questions = parse(text, ParseMode::Loose).unwrap();
    assert_eq!(
        questions[0].prompt,
        "What is the most you would spend on this purchase?"
    );
    assert_eq!(questions[0].category.as_deref(), Some("General"));
}

#[test]
fn test_category_and_help_text_are_derived() {
    let text = "1. How much cargo space do you need?\nA) A little\nB) A lot";
    let questions = parse(text, ParseMode::Loose).unwrap();
    assert_eq!(questions[0].category.as_deref(), Some("Space & Capacity"));
    assert!(questions[0].help_text.is_some());
}

#[test]
fn test_bad_section_does_not_affect_neighbours() {
    let text = "1. First?\nA) Yes\nB) No\n\n2. ???\nA) ?\n\n3. Third?\nA) Up\nB) Down";
    let questions = parse(text, ParseMode::Loose).unwrap();
    let prompts: Vec<&str> = questions.iter().map(|q| q.prompt.as_str()).collect();
    assert_eq!(prompts, vec!["First?", "Third?"]);
}

#[test]
fn test_crlf_input() {
    let text = "1. Which size?\r\nA) Small\r\nB) Large\r\n";
    let questions = parse(text, ParseMode::Loose).unwrap();
    assert_eq!(option_texts(&questions[0]), vec!["Small", "Large"]);
}

#[test]
fn test_empty_input_is_an_error() {
    assert_eq!(parse("   \n ", ParseMode::Loose), Err(ParseError::EmptyInput));
}

#[test]
fn test_no_questions_is_an_error() {
    let err = parse("Thank you for your time.", ParseMode::Loose).unwrap_err();
    assert_eq!(
        err,
        ParseError::NoQuestions {
            sections: 1,
            mode: ParseMode::Loose
        }
    );
}

#[test]
fn test_parser_kind_builds_matching_parser() {
    assert_eq!(ParserKind::Heuristic.build().name(), "heuristic");
    assert_eq!(ParserKind::Json.build().name(), "json");
    assert_eq!("JSON".parse::<ParserKind>(), Ok(ParserKind::Json));
    assert!("yaml".parse::<ParserKind>().is_err());
}

#[test]
fn test_parse_mode_accepts() {
    assert!(ParseMode::Loose.accepts(2));
    assert!(ParseMode::Loose.accepts(5));
    assert!(!ParseMode::Loose.accepts(1));
    assert!(ParseMode::Strict.accepts(4));
    assert!(!ParseMode::Strict.accepts(5));
}
