#[cfg(test)]
mod tests {
    use crate::errors::Error;
    use crate::goals::{Goal, GoalType};
    use crate::progress::{
        DateRange, NewProgress, NewTimeProgress, Progress, ProgressFilter, ProgressService,
        ProgressServiceTrait, ProgressUpdate,
    };
    use crate::test_support::{
        date, goal_fixture, InMemoryGoalRepository, InMemoryProgressRepository, OTHER_USER, USER,
    };
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;

    // ============== Helpers ==============

    fn setup(goals: Vec<Goal>) -> (ProgressService, Arc<InMemoryProgressRepository>) {
        let progress_repo = Arc::new(InMemoryProgressRepository::default());
        let goal_repo = Arc::new(InMemoryGoalRepository::with_goals(goals));
        let service = ProgressService::new(progress_repo.clone(), goal_repo);
        (service, progress_repo)
    }

    fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
        day.and_hms_opt(hour, 0, 0).unwrap()
    }

    fn entry(goal_id: &str, value: f64, tracked: NaiveDateTime) -> NewProgress {
        NewProgress {
            goal_id: goal_id.to_string(),
            value,
            notes: None,
            tracked_date: tracked,
        }
    }

    fn seeded(id: &str, goal_id: &str, user_id: &str, day: NaiveDate, rate: f64) -> Progress {
        Progress {
            id: id.to_string(),
            goal_id: goal_id.to_string(),
            user_id: user_id.to_string(),
            value: rate / 10.0,
            completion_rate: rate,
            notes: None,
            tracked_date: day,
            created_at: at(day, 9),
            updated_at: at(day, 9),
        }
    }

    // ============== Create ==============

    #[tokio::test]
    async fn test_create_computes_completion_rate() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);

        let created = service
            .create_progress(USER, entry("g1", 5.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        assert_eq!(created.progress.value, 5.0);
        assert_eq!(created.progress.completion_rate, 50.0);
        assert_eq!(created.progress.tracked_date, date(2025, 6, 1));
        assert_eq!(created.progress.user_id, USER);
        assert_eq!(created.progress.created_at, created.progress.updated_at);
        assert_eq!(created.goal.id, "g1");
        assert_eq!(repo.all().len(), 1);
    }

    #[tokio::test]
    async fn test_create_normalizes_boolean_input() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Boolean, 1.0)]);

        let created = service
            .create_progress(USER, entry("g1", 5.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        assert_eq!(created.progress.value, 1.0);
        assert_eq!(created.progress.completion_rate, 100.0);
        assert!(created.progress.is_complete());
    }

    #[tokio::test]
    async fn test_create_caps_over_completion() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Distance, 5.0)]);

        let created = service
            .create_progress(USER, entry("g1", 12.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        assert_eq!(created.progress.value, 12.0);
        assert_eq!(created.progress.completion_rate, 100.0);
    }

    #[tokio::test]
    async fn test_create_with_non_positive_target_has_zero_rate() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 0.0)]);

        let created = service
            .create_progress(USER, entry("g1", 7.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        assert_eq!(created.progress.completion_rate, 0.0);
    }

    #[tokio::test]
    async fn test_create_for_missing_or_foreign_goal_is_not_found() {
        let (service, repo) = setup(vec![goal_fixture("g1", OTHER_USER, GoalType::Quantity, 10.0)]);

        let foreign = service
            .create_progress(USER, entry("g1", 5.0, at(date(2025, 6, 1), 8)))
            .await;
        assert!(matches!(foreign, Err(Error::NotFound(_))));

        let missing = service
            .create_progress(USER, entry("nope", 5.0, at(date(2025, 6, 1), 8)))
            .await;
        assert!(matches!(missing, Err(Error::NotFound(_))));
        assert!(repo.all().is_empty());
    }

    #[tokio::test]
    async fn test_second_entry_on_same_day_conflicts() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        let day = date(2025, 6, 1);

        service
            .create_progress(USER, entry("g1", 5.0, at(day, 7)))
            .await
            .unwrap();
        let second = service
            .create_progress(USER, entry("g1", 8.0, at(day, 22)))
            .await;

        assert!(matches!(second, Err(Error::Conflict(_))));
        assert_eq!(repo.all().len(), 1);
    }

    #[tokio::test]
    async fn test_same_day_on_different_goals_is_allowed() {
        let (service, repo) = setup(vec![
            goal_fixture("g1", USER, GoalType::Quantity, 10.0),
            goal_fixture("g2", USER, GoalType::Quantity, 10.0),
        ]);
        let day = date(2025, 6, 1);

        service
            .create_progress(USER, entry("g1", 5.0, at(day, 7)))
            .await
            .unwrap();
        service
            .create_progress(USER, entry("g2", 5.0, at(day, 7)))
            .await
            .unwrap();

        assert_eq!(repo.all().len(), 2);
    }

    #[tokio::test]
    async fn test_store_unique_violation_is_reported_as_conflict() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        let day = date(2025, 6, 1);
        repo.seed(seeded("existing", "g1", USER, day, 40.0));
        repo.hide_existing_on_lookup();

        let result = service
            .create_progress(USER, entry("g1", 5.0, at(day, 12)))
            .await;

        assert!(matches!(result, Err(Error::Conflict(_))));
        assert_eq!(repo.all().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_implausible_values() {
        let (service, _) = setup(vec![
            goal_fixture("time", USER, GoalType::Time, 60.0),
            goal_fixture("qty", USER, GoalType::Quantity, 10.0),
        ]);
        let day = at(date(2025, 6, 1), 8);

        let too_long = service.create_progress(USER, entry("time", 1500.0, day)).await;
        assert!(matches!(too_long, Err(Error::Validation(_))));

        let too_many = service.create_progress(USER, entry("qty", 101.0, day)).await;
        assert!(matches!(too_many, Err(Error::Validation(_))));

        let negative = service.create_progress(USER, entry("qty", -1.0, day)).await;
        assert!(matches!(negative, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_notes() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        let mut input = entry("g1", 5.0, at(date(2025, 6, 1), 8));
        input.notes = Some("x".repeat(1001));

        let result = service.create_progress(USER, input).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    // ============== Create (hours/minutes) ==============

    fn time_entry(goal_id: &str, hours: u32, minutes: u32) -> NewTimeProgress {
        NewTimeProgress {
            goal_id: goal_id.to_string(),
            hours,
            minutes,
            notes: Some("evening session".to_string()),
            tracked_date: at(date(2025, 6, 2), 20),
        }
    }

    #[tokio::test]
    async fn test_create_time_progress_combines_hours_and_minutes() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Time, 120.0)]);

        let created = service
            .create_time_progress(USER, time_entry("g1", 1, 30))
            .await
            .unwrap();

        assert_eq!(created.progress.value, 90.0);
        assert_eq!(created.progress.completion_rate, 75.0);
        assert_eq!(created.goal.format_value(created.progress.value), "1h 30m");
    }

    #[tokio::test]
    async fn test_create_time_progress_requires_time_goal() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);

        let result = service.create_time_progress(USER, time_entry("g1", 1, 0)).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_time_progress_bounds_hours_and_minutes() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Time, 120.0)]);

        let hours = service.create_time_progress(USER, time_entry("g1", 24, 0)).await;
        assert!(matches!(hours, Err(Error::Validation(_))));

        let minutes = service.create_time_progress(USER, time_entry("g1", 0, 60)).await;
        assert!(matches!(minutes, Err(Error::Validation(_))));
    }

    // ============== Update ==============

    #[tokio::test]
    async fn test_update_value_recomputes_rate() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 20.0)]);
        let created = service
            .create_progress(USER, entry("g1", 5.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        let updated = service
            .update_progress(
                USER,
                &created.progress.id,
                ProgressUpdate {
                    value: Some(15.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.progress.value, 15.0);
        assert_eq!(updated.progress.completion_rate, 75.0);
        assert_eq!(updated.progress.tracked_date, date(2025, 6, 1));
        assert!(updated.progress.updated_at >= created.progress.updated_at);
    }

    #[tokio::test]
    async fn test_update_notes_only_keeps_value() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 20.0)]);
        let created = service
            .create_progress(USER, entry("g1", 5.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        let updated = service
            .update_progress(
                USER,
                &created.progress.id,
                ProgressUpdate {
                    notes: Some("felt good".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.progress.notes.as_deref(), Some("felt good"));
        assert_eq!(updated.progress.value, 5.0);
        assert_eq!(updated.progress.completion_rate, 25.0);
    }

    #[tokio::test]
    async fn test_update_date_onto_existing_entry_conflicts() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        let a = service
            .create_progress(USER, entry("g1", 5.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();
        service
            .create_progress(USER, entry("g1", 6.0, at(date(2025, 6, 2), 8)))
            .await
            .unwrap();

        let result = service
            .update_progress(
                USER,
                &a.progress.id,
                ProgressUpdate {
                    tracked_date: Some(at(date(2025, 6, 2), 23)),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(Error::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_date_frees_old_slot() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        let a = service
            .create_progress(USER, entry("g1", 5.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        let moved = service
            .update_progress(
                USER,
                &a.progress.id,
                ProgressUpdate {
                    tracked_date: Some(at(date(2025, 6, 3), 8)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.progress.tracked_date, date(2025, 6, 3));

        service
            .create_progress(USER, entry("g1", 9.0, at(date(2025, 6, 1), 18)))
            .await
            .unwrap();
        assert_eq!(repo.all().len(), 2);
    }

    #[tokio::test]
    async fn test_update_date_to_same_day_is_not_a_conflict() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        let a = service
            .create_progress(USER, entry("g1", 5.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        let result = service
            .update_progress(
                USER,
                &a.progress.id,
                ProgressUpdate {
                    tracked_date: Some(at(date(2025, 6, 1), 21)),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_store_unique_violation_is_reported_as_conflict() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        repo.seed(seeded("a", "g1", USER, date(2025, 6, 1), 40.0));
        repo.seed(seeded("b", "g1", USER, date(2025, 6, 2), 60.0));
        repo.hide_existing_on_lookup();

        let result = service
            .update_progress(
                USER,
                "a",
                ProgressUpdate {
                    tracked_date: Some(at(date(2025, 6, 2), 12)),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(Error::Conflict(_))));
        let a = repo.all().into_iter().find(|p| p.id == "a").unwrap();
        assert_eq!(a.tracked_date, date(2025, 6, 1));
    }

    #[tokio::test]
    async fn test_update_of_concurrently_deleted_record_is_not_found() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        repo.seed(seeded("a", "g1", USER, date(2025, 6, 1), 40.0));
        repo.delete_before_next_update();

        let result = service
            .update_progress(
                USER,
                "a",
                ProgressUpdate {
                    value: Some(8.0),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(repo.all().is_empty());
    }

    #[tokio::test]
    async fn test_update_foreign_record_is_not_found() {
        let (service, repo) = setup(vec![goal_fixture("g1", OTHER_USER, GoalType::Quantity, 10.0)]);
        repo.seed(seeded("p1", "g1", OTHER_USER, date(2025, 6, 1), 50.0));

        let result = service
            .update_progress(
                USER,
                "p1",
                ProgressUpdate {
                    value: Some(1.0),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(repo.all()[0].completion_rate, 50.0);
    }

    // ============== Get / List / Delete ==============

    #[tokio::test]
    async fn test_get_progress_returns_goal() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Time, 60.0)]);
        let created = service
            .create_progress(USER, entry("g1", 45.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        let fetched = service.get_progress(USER, &created.progress.id).unwrap();
        assert_eq!(fetched.progress, created.progress);
        assert_eq!(fetched.goal.id, "g1");

        let foreign = service.get_progress(OTHER_USER, &created.progress.id);
        assert!(matches!(foreign, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_list_progress_is_newest_first_and_paginated() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        for day in 1..=5 {
            repo.seed(seeded(
                &format!("p{}", day),
                "g1",
                USER,
                date(2025, 6, day),
                10.0 * day as f64,
            ));
        }
        repo.seed(seeded("other", "g1", OTHER_USER, date(2025, 6, 9), 10.0));

        let first = service
            .list_progress(USER, ProgressFilter::default(), Some(1), Some(2))
            .unwrap();
        let ids: Vec<&str> = first.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p5", "p4"]);

        let last = service
            .list_progress(USER, ProgressFilter::default(), Some(3), Some(2))
            .unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].id, "p1");

        let filtered = service
            .list_progress(
                USER,
                ProgressFilter {
                    goal_id: Some("g1".to_string()),
                    start_date: Some(date(2025, 6, 2)),
                    end_date: Some(date(2025, 6, 3)),
                },
                None,
                None,
            )
            .unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_list_progress_beyond_last_page_is_empty() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        repo.seed(seeded("p1", "g1", USER, date(2025, 6, 1), 10.0));

        let result = service
            .list_progress(USER, ProgressFilter::default(), Some(i64::MAX), Some(20))
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_delete_progress() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        let created = service
            .create_progress(USER, entry("g1", 5.0, at(date(2025, 6, 1), 8)))
            .await
            .unwrap();

        let foreign = service.delete_progress(OTHER_USER, &created.progress.id).await;
        assert!(matches!(foreign, Err(Error::NotFound(_))));
        assert_eq!(repo.all().len(), 1);

        service
            .delete_progress(USER, &created.progress.id)
            .await
            .unwrap();
        assert!(repo.all().is_empty());

        let again = service.delete_progress(USER, &created.progress.id).await;
        assert!(matches!(again, Err(Error::NotFound(_))));
    }

    // ============== Summary / Heatmap ==============

    #[test]
    fn test_summary_sorts_entries_before_computing_streaks() {
        let (service, repo) = setup(vec![goal_fixture("g1", USER, GoalType::Quantity, 10.0)]);
        // Seeded out of order; rates by date are [50, 0, 80, 90, 0, 30].
        let rates = [(3, 80.0), (6, 30.0), (1, 50.0), (5, 0.0), (2, 0.0), (4, 90.0)];
        for (day, rate) in rates {
            repo.seed(seeded(&format!("p{}", day), "g1", USER, date(2025, 6, day), rate));
        }

        let range = DateRange::new(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        let summary = service
            .get_progress_summary(USER, "g1", Some(range))
            .unwrap();

        assert_eq!(summary.total_entries, 6);
        assert_eq!(summary.longest_streak, 2);
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.best_completion, 90.0);
        assert_eq!(summary.last_tracked_date, Some(date(2025, 6, 6)));
    }

    #[test]
    fn test_summary_for_empty_range() {
        let (service, _) = setup(vec![goal_fixture("g1", USER, GoalType::Time, 30.0)]);
        let range = DateRange::new(date(2025, 6, 1), date(2025, 6, 30)).unwrap();

        let summary = service
            .get_progress_summary(USER, "g1", Some(range))
            .unwrap();

        assert_eq!(summary.total_entries, 0);
        assert_eq!(summary.average_completion, 0.0);
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_streak, 0);
        assert_eq!(summary.goal_type, GoalType::Time);
    }

    #[test]
    fn test_summary_for_foreign_goal_is_not_found() {
        let (service, _) = setup(vec![goal_fixture("g1", OTHER_USER, GoalType::Time, 30.0)]);
        let result = service.get_progress_summary(USER, "g1", None);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_heatmap_joins_goals_and_orders_by_date() {
        let mut reading = goal_fixture("read", USER, GoalType::Quantity, 10.0);
        reading.color_code = "#AA0000".to_string();
        let (service, repo) = setup(vec![
            reading,
            goal_fixture("run", USER, GoalType::Distance, 5.0),
        ]);
        repo.seed(seeded("p3", "run", USER, date(2025, 6, 9), 90.0));
        repo.seed(seeded("p1", "read", USER, date(2025, 6, 1), 50.0));
        repo.seed(seeded("p2", "read", USER, date(2025, 6, 4), 100.0));
        repo.seed(seeded("x", "theirs", OTHER_USER, date(2025, 6, 2), 100.0));

        let range = DateRange::new(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        let cells = service.get_heatmap(USER, Some(range)).unwrap();

        let dates: Vec<NaiveDate> = cells.iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![date(2025, 6, 1), date(2025, 6, 4), date(2025, 6, 9)]);
        assert_eq!(cells[0].goal_title, "Goal read");
        assert_eq!(cells[0].color_code, "#AA0000");
        assert_eq!(cells[0].formatted_value, "5.0 pages");
        assert_eq!(cells[2].formatted_value, "9.0 km");
        assert_eq!(cells[2].intensity, 4);
    }
}
