use chrono::NaiveDate;
use life_copilot::models::*;
use life_copilot::store::{TaskError, TaskStore};
use speculate2::speculate;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

speculate! {
    before {
        let today = date(2024, 6, 10);
        let mut store = TaskStore::new();
    }

    describe "add" {
        it "appends an incomplete task with trimmed text" {
            let task = store
                .add(CreateTaskInput::new("  Submit quarterly report  ", date(2024, 6, 14)), today)
                .expect("Failed to add task");

            assert_eq!(task.text, "Submit quarterly report");
            assert_eq!(task.due_date, date(2024, 6, 14));
            assert!(!task.completed);
            assert_eq!(store.list(), &[task]);
        }

        it "keeps insertion order" {
            let first = store.add(CreateTaskInput::new("First", date(2024, 6, 20)), today).unwrap();
            let second = store.add(CreateTaskInput::new("Second", date(2024, 6, 11)), today).unwrap();

            let ids: Vec<Uuid> = store.list().iter().map(|t| t.id).collect();
            assert_eq!(ids, vec![first.id, second.id]);
        }

        it "accepts a task due today" {
            assert!(store.add(CreateTaskInput::new("Today", today), today).is_ok());
        }

        it "rejects empty text without changing the store" {
            let err = store.add(CreateTaskInput::new("   ", date(2024, 6, 14)), today).unwrap_err();

            assert_eq!(err, TaskError::EmptyText);
            assert!(store.list().is_empty());
        }

        it "rejects a missing due date" {
            let input = CreateTaskInput { text: "No date".to_string(), due_date: None };
            let err = store.add(input, today).unwrap_err();

            assert_eq!(err, TaskError::MissingDueDate);
            assert!(store.list().is_empty());
        }

        it "rejects a due date in the past" {
            let err = store.add(CreateTaskInput::new("Late", date(2024, 6, 9)), today).unwrap_err();

            assert!(matches!(err, TaskError::DueDateInPast { .. }));
            assert!(store.list().is_empty());
        }
    }

    describe "toggle" {
        it "flips completed back and forth" {
            let task = store.add(CreateTaskInput::new("Toggle me", today), today).unwrap();

            assert!(store.toggle(task.id).unwrap().completed);
            assert!(!store.toggle(task.id).unwrap().completed);
            assert!(!store.list().iter().find(|t| t.id == task.id).unwrap().completed);
        }

        it "returns None for an unknown id" {
            store.add(CreateTaskInput::new("Keep me", today), today).unwrap();
            let before = store.list().to_vec();

            assert!(store.toggle(Uuid::new_v4()).is_none());
            assert_eq!(store.list(), before.as_slice());
        }
    }

    describe "delete" {
        it "removes only the given task" {
            let a = store.add(CreateTaskInput::new("A", today), today).unwrap();
            let b = store.add(CreateTaskInput::new("B", today), today).unwrap();

            assert!(store.delete(a.id));
            assert_eq!(store.list(), &[b]);
        }

        it "leaves the store unchanged for an unknown id" {
            store.add(CreateTaskInput::new("Keep me", today), today).unwrap();
            let before = store.list().to_vec();

            assert!(!store.delete(Uuid::new_v4()));
            assert_eq!(store.list(), before.as_slice());
        }
    }

    describe "is_open" {
        it "is false only for completed tasks" {
            let done = store.add(CreateTaskInput::new("Done", today), today).unwrap();
            let open = store.add(CreateTaskInput::new("Open", today), today).unwrap();
            store.toggle(done.id);

            let ids: Vec<Uuid> = store.list().iter().filter(|t| t.is_open()).map(|t| t.id).collect();
            assert_eq!(ids, vec![open.id]);
        }
    }

    describe "with_demo_tasks" {
        it "seeds four tasks relative to today with one completed" {
            let demo = TaskStore::with_demo_tasks(today);

            assert_eq!(demo.list().len(), 4);
            assert_eq!(demo.list().iter().filter(|t| t.is_open()).count(), 3);
            let due: Vec<NaiveDate> = demo.list().iter().map(|t| t.due_date).collect();
            assert_eq!(due, vec![date(2024, 6, 12), date(2024, 6, 14), date(2024, 6, 14), date(2024, 6, 16)]);
        }
    }
}
