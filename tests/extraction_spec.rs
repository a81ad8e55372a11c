use scribe::conversation::parse_update_plan;
use scribe::models::Classification;
use speculate2::speculate;

const FULL_RESPONSE: &str = r#"{
    "journal_entry": {"period_description": "this week", "summary": "Built the lander"},
    "projects_to_update": [
        {
            "title": "Apollo",
            "classification": "Moonshot",
            "status": "On track",
            "next_steps": "Fly",
            "executive_summary": "Reach the moon",
            "prototypes": null,
            "supporting_work": "Orbital sim"
        }
    ],
    "projects_to_create": [
        {
            "title": "Gemini",
            "classification": "Core",
            "status": "Kicked off",
            "next_steps": "Staff the team",
            "executive_summary": "Two seats",
            "image_url": "https://img.example.net/gemini.png"
        }
    ]
}"#;

speculate! {
    describe "update plan extraction" {
        it "parses a complete response" {
            let plan = parse_update_plan(FULL_RESPONSE).expect("Parse failed");

            assert_eq!(plan.journal_entries.len(), 1);
            assert_eq!(plan.journal_entries[0].period_description, "this week");
            assert_eq!(plan.journal_entries[0].summary, "Built the lander");

            assert_eq!(plan.projects_to_update.len(), 1);
            let apollo = &plan.projects_to_update[0];
            assert_eq!(apollo.title, "Apollo");
            assert_eq!(apollo.classification, Classification::Moonshot);
            assert_eq!(apollo.prototypes, None);
            assert_eq!(apollo.supporting_work.as_deref(), Some("Orbital sim"));

            assert_eq!(plan.projects_to_create.len(), 1);
            let gemini = &plan.projects_to_create[0];
            assert_eq!(gemini.classification, Classification::Core);
            assert_eq!(gemini.image_url.as_deref(), Some("https://img.example.net/gemini.png"));
        }

        it "accepts a json code fence" {
            let fenced = format!("```json\n{}\n```", FULL_RESPONSE);
            assert!(parse_update_plan(&fenced).is_ok());
        }

        it "accepts a bare code fence with prose around it" {
            let fenced = format!("Here is the plan:\n```\n{}\n```\nLet me know!", FULL_RESPONSE);
            assert!(parse_update_plan(&fenced).is_ok());
        }

        it "defaults missing arrays to empty" {
            let raw = r#"{"journal_entry": {"summary": "Did X"}}"#;
            let plan = parse_update_plan(raw).expect("Parse failed");

            assert!(plan.projects_to_update.is_empty());
            assert!(plan.projects_to_create.is_empty());
        }

        it "skips the journal entry when it is null" {
            let raw = r#"{"journal_entry": null, "projects_to_update": [], "projects_to_create": []}"#;
            let plan = parse_update_plan(raw).expect("Parse failed");

            assert!(plan.journal_entries.is_empty());
            assert!(plan.is_empty());
        }

        it "defaults the period description to today" {
            let raw = r#"{"journal_entry": {"summary": "Did X"}}"#;
            let plan = parse_update_plan(raw).expect("Parse failed");

            assert_eq!(plan.journal_entries[0].period_description, "today");
        }

        it "degrades unknown classifications to exploratory" {
            let raw = r#"{
                "journal_entry": null,
                "projects_to_update": [{
                    "title": "Rush job",
                    "classification": "Urgent",
                    "status": "s",
                    "next_steps": "n",
                    "executive_summary": "e"
                }]
            }"#;
            let plan = parse_update_plan(raw).expect("Parse failed");

            assert_eq!(plan.projects_to_update[0].classification, Classification::Exploratory);
        }

        it "treats a missing classification the same way" {
            let raw = r#"{
                "journal_entry": null,
                "projects_to_create": [{
                    "title": "Quiet one",
                    "classification": null,
                    "status": "s",
                    "next_steps": "n",
                    "executive_summary": "e"
                }]
            }"#;
            let plan = parse_update_plan(raw).expect("Parse failed");

            assert_eq!(plan.projects_to_create[0].classification, Classification::Exploratory);
        }

        it "rejects responses missing required project fields" {
            let raw = r#"{"projects_to_create": [{"title": "Nameless"}]}"#;
            assert!(parse_update_plan(raw).is_err());
        }

        it "rejects responses that are not json" {
            assert!(parse_update_plan("Sorry, I could not do that.").is_err());
        }
    }
}
