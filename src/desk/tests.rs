//! Unit tests for the desk service

#[cfg(test)]
mod tests {
    use crate::desk::{today, Desk, Intent, IntentOutcome, SequentialIds};
    use crate::domain::MISSING_REQUIRED_FIELDS;
    use crate::schemas::{
        ApplicationDraft, ApplicationStatus, ApplicationType, ApprovalMode, Config,
        DesiredStatus, DevStatus, RuleStatus, SubmitMode, SubmitRequest,
    };
    use crate::seed::{BuiltinSeed, SeedProvider};

    fn desk_with(config: Config) -> Desk {
        Desk::new(config, BuiltinSeed.load().unwrap()).with_ids(SequentialIds::new("n", 1))
    }

    fn desk(mode: ApprovalMode) -> Desk {
        desk_with(Config {
            approval_mode: mode,
            ..Config::default()
        })
    }

    fn complete_draft() -> ApplicationDraft {
        ApplicationDraft {
            level: "收派环节".to_string(),
            reward_penalty_level: "收派岗".to_string(),
            item1: "投诉".to_string(),
            item2: "虚假签收".to_string(),
            logic: "签收时GPS不在围栏内".to_string(),
            ..Default::default()
        }
    }

    // ===== SUBMISSION & APPROVAL =====

    #[test]
    fn test_fresh_submission_is_approved_and_prepended() {
        let mut desk = desk(ApprovalMode::Immediate);
        let before = desk.applications().to_vec();

        let app = desk
            .submit_for_approval(complete_draft(), SubmitMode::Create)
            .unwrap()
            .unwrap();

        assert_eq!(app.id, "n1");
        assert_eq!(app.status, ApplicationStatus::Approved);
        assert_eq!(app.dev_status, Some(DevStatus::Pending));
        assert_eq!(app.creator, "当前用户");
        assert_eq!(app.desc, "签收时GPS不在围栏内");
        assert_eq!(desk.applications().len(), before.len() + 1);
        assert_eq!(desk.applications()[0].id, "n1");
        assert_eq!(&desk.applications()[1..], &before[..]);
        assert_eq!(desk.outstanding_approvals(), 0);
    }

    #[test]
    fn test_manual_approval_waits() {
        let mut desk = desk(ApprovalMode::Manual);
        desk.submit_for_approval(complete_draft(), SubmitMode::Create).unwrap();
        assert_eq!(desk.application("n1").unwrap().status, ApplicationStatus::Pending);
        assert_eq!(desk.pump_approvals(), 0);

        assert!(desk.approve("n1").unwrap());
        assert_eq!(desk.application("n1").unwrap().status, ApplicationStatus::Approved);

        let err = desk.approve("n1").unwrap_err();
        assert_eq!(err.code(), "STATE_TRANSITION");
    }

    #[test]
    fn test_reject() {
        let mut desk = desk(ApprovalMode::Manual);
        assert!(desk.reject("101").unwrap());
        assert_eq!(desk.application("101").unwrap().status, ApplicationStatus::Rejected);
        assert!(desk.reject("101").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_approval_lands_on_settle() {
        let mut desk = desk(ApprovalMode::Delayed);
        desk.submit_for_approval(complete_draft(), SubmitMode::Create).unwrap();

        assert_eq!(desk.application("n1").unwrap().status, ApplicationStatus::Pending);
        assert_eq!(desk.outstanding_approvals(), 1);

        assert_eq!(desk.settle().await, 1);
        let app = desk.application("n1").unwrap();
        assert_eq!(app.status, ApplicationStatus::Approved);
        assert_eq!(app.dev_status, Some(DevStatus::Pending));
        assert_eq!(desk.outstanding_approvals(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_approval_is_dropped() {
        let mut desk = desk(ApprovalMode::Delayed);
        desk.submit_for_approval(complete_draft(), SubmitMode::Create).unwrap();
        assert!(desk.reject("n1").unwrap());

        assert_eq!(desk.settle().await, 0);
        assert_eq!(desk.application("n1").unwrap().status, ApplicationStatus::Rejected);
    }

    #[test]
    fn test_validation_failure_changes_nothing() {
        let mut desk = desk(ApprovalMode::Immediate);
        let before = desk.applications().to_vec();

        let draft = ApplicationDraft {
            item1: String::new(),
            ..complete_draft()
        };
        let err = desk.submit_for_approval(draft, SubmitMode::Create).unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().starts_with(MISSING_REQUIRED_FIELDS));
        assert_eq!(desk.applications(), &before[..]);
    }

    #[test]
    fn test_draft_save_never_auto_approves() {
        let mut desk = desk(ApprovalMode::Immediate);
        let app = desk
            .save_draft(ApplicationDraft::default(), SubmitMode::Create)
            .unwrap()
            .unwrap();

        assert_eq!(app.status, ApplicationStatus::Draft);
        assert_eq!(desk.outstanding_approvals(), 0);
        assert_eq!(desk.pump_approvals(), 0);
    }

    #[test]
    fn test_resubmitting_rejected_application_keeps_its_id() {
        let mut desk = desk(ApprovalMode::Immediate);
        let (draft, mode) = desk.prefill_edit("106").unwrap();
        assert_eq!(mode, SubmitMode::Iterate);

        let app = desk
            .submit(SubmitRequest::submit(draft, mode).editing("106"))
            .unwrap()
            .unwrap();

        assert_eq!(app.id, "106");
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(desk.applications().len(), 6);
        assert_eq!(desk.applications()[5].id, "106");
    }

    #[test]
    fn test_re_editing_in_flight_application_is_refused() {
        let mut desk = desk(ApprovalMode::Manual);
        let request = SubmitRequest::draft(complete_draft(), SubmitMode::Create).editing("104");
        let err = desk.submit(request).unwrap_err();
        assert_eq!(err.code(), "STATE_TRANSITION");
    }

    // ===== ITERATION & RELEASE =====

    #[test]
    fn test_iterate_release_and_history() {
        let mut desk = desk(ApprovalMode::Immediate);

        let app = desk
            .iterate("2", "投诉扣罚上调至300元", "投诉率上升", DesiredStatus::Pending)
            .unwrap()
            .unwrap();
        assert_eq!(app.application_type, ApplicationType::Iterate);
        assert_eq!(app.rule_id.as_deref(), Some("2"));
        assert_eq!(app.version, 3);
        assert_eq!(app.desc, "投诉扣罚上调至300元");
        assert_eq!(app.status, ApplicationStatus::Approved);

        assert!(desk.update_dev_status(&app.id, DevStatus::Done, "LiSi"));
        let rule = desk.release(&app.id).unwrap().unwrap();

        assert_eq!(rule.version, 4);
        assert_eq!(rule.lineage(), "2");
        assert_eq!(rule.penalty_std, "每次扣罚200元，严重者停岗培训");
        assert_eq!(desk.rules()[0].id, rule.id);
        assert_eq!(desk.rule("2").unwrap().status, RuleStatus::Inactive);
        assert_eq!(desk.application(&app.id).unwrap().status, ApplicationStatus::Released);

        let versions: Vec<u32> = desk.history("2").iter().map(|r| r.version).collect();
        assert_eq!(versions, vec![3, 4]);
        assert_eq!(desk.history(&rule.id).len(), 2);
        assert!(desk.history("nope").is_empty());
    }

    #[test]
    fn test_iterate_unknown_rule() {
        let mut desk = desk(ApprovalMode::Manual);
        assert!(desk
            .iterate("99", "x", "", DesiredStatus::Pending)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_release_seeded_iteration_without_rule_reference() {
        let mut desk = desk(ApprovalMode::Manual);
        let statuses: Vec<RuleStatus> = desk.rules().iter().map(|r| r.status).collect();

        let rule = desk.release("103").unwrap().unwrap();

        assert_eq!(rule.version, 3);
        assert_eq!(rule.logic, "调整处罚金额，从50元/次上调至200元/次。");
        assert_eq!(rule.target, "全网");
        assert_eq!(desk.rules().len(), 9);
        let after: Vec<RuleStatus> = desk.rules()[1..].iter().map(|r| r.status).collect();
        assert_eq!(after, statuses);
    }

    #[test]
    fn test_strict_release_refuses_unready_application() {
        let mut desk = desk(ApprovalMode::Manual);
        let err = desk.release("102").unwrap_err();
        assert_eq!(err.code(), "STATE_TRANSITION");
        assert_eq!(desk.rules().len(), 8);

        let mut lenient = desk_with(Config {
            approval_mode: ApprovalMode::Manual,
            strict_release: false,
            ..Config::default()
        });
        assert!(lenient.release("102").unwrap().is_some());
    }

    #[test]
    fn test_failed_releases_do_not_consume_ids() {
        let mut desk = desk(ApprovalMode::Manual);
        assert!(desk.release("102").is_err());
        assert!(desk.release("nope").unwrap().is_none());

        let rule = desk.release("103").unwrap().unwrap();
        assert_eq!(rule.id, "n1");
    }

    #[test]
    fn test_release_at_last_version() {
        let mut seed = BuiltinSeed.load().unwrap();
        let app = seed.applications.iter_mut().find(|a| a.id == "103").unwrap();
        app.version = u32::MAX;
        let mut desk = Desk::new(Config::default(), seed)
            .with_ids(SequentialIds::new("n", 1));

        let rule = desk.release("103").unwrap().unwrap();

        assert_eq!(rule.version, u32::MAX);
        assert_eq!(desk.application("103").unwrap().status, ApplicationStatus::Released);
    }

    #[test]
    fn test_release_is_dated_in_utc() {
        let mut desk = desk(ApprovalMode::Manual);
        let before = chrono::Utc::now().date_naive().to_string();
        let rule = desk.release("103").unwrap().unwrap();
        let after = chrono::Utc::now().date_naive().to_string();

        assert!(rule.first_apply_date == before || rule.first_apply_date == after);
        assert_eq!(today().len(), 10);
    }

    #[test]
    fn test_release_new_rule_reports_duplicates() {
        let mut desk = desk(ApprovalMode::Immediate);
        assert!(desk.duplicate_active_lineages().is_empty());

        let draft = ApplicationDraft {
            item1: "客户投诉".to_string(),
            item2: "态度恶劣".to_string(),
            ..complete_draft()
        };
        let app = desk.submit_for_approval(draft, SubmitMode::Create).unwrap().unwrap();
        desk.update_dev_status(&app.id, DevStatus::Done, "LiSi");
        let rule = desk.release(&app.id).unwrap().unwrap();

        assert_eq!(desk.rule("2").unwrap().status, RuleStatus::Active);
        let duplicates = desk.duplicate_active_lineages();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].rule_ids, vec![rule.id.clone(), "2".to_string()]);
    }

    // ===== NO-OPS ON UNKNOWN IDS =====

    #[test]
    fn test_unknown_ids_change_nothing() {
        let mut desk = desk(ApprovalMode::Manual);
        let rules = desk.rules().to_vec();
        let apps = desk.applications().to_vec();

        assert!(!desk.manage_permissions("99", "Alice", "Bob"));
        assert!(!desk.offline_rule("99"));
        assert!(!desk.update_dev_status("999", DevStatus::Done, "LiSi"));
        assert!(desk.release("999").unwrap().is_none());
        assert!(!desk.approve("999").unwrap());
        assert!(!desk.reject("999").unwrap());

        assert_eq!(desk.rules(), &rules[..]);
        assert_eq!(desk.applications(), &apps[..]);
    }

    #[test]
    fn test_permissions_and_offline() {
        let mut desk = desk(ApprovalMode::Manual);
        assert!(desk.manage_permissions("3", "Alice", "Bob"));
        let rule = desk.rule("3").unwrap();
        assert_eq!((rule.creator.as_str(), rule.owner.as_str()), ("Alice", "Bob"));

        assert!(desk.offline_rule("3"));
        assert!(desk.offline_rule("3"));
        assert_eq!(desk.rule("3").unwrap().status, RuleStatus::Inactive);
    }

    // ===== INTENTS =====

    #[test]
    fn test_apply_intents() {
        let mut desk = desk(ApprovalMode::Immediate);

        let outcome = desk
            .apply_intent(Intent::UpdateDevStatus {
                id: "102".to_string(),
                status: DevStatus::Done,
                owner: "LiSi".to_string(),
            })
            .unwrap();
        assert_eq!(outcome, IntentOutcome::Updated { id: "102".to_string() });

        let outcome = desk.apply_intent(Intent::Release { id: "102".to_string() }).unwrap();
        assert_eq!(
            outcome,
            IntentOutcome::Released {
                application: "102".to_string(),
                rule: "n1".to_string(),
                retired: None,
            }
        );

        let outcome = desk.apply_intent(Intent::Offline { id: "77".to_string() }).unwrap();
        assert_eq!(outcome, IntentOutcome::Ignored { id: "77".to_string() });

        let outcome = desk
            .apply_intent(Intent::SaveDraft {
                draft: ApplicationDraft::default(),
                mode: SubmitMode::Create,
                existing: None,
            })
            .unwrap();
        assert_eq!(
            outcome,
            IntentOutcome::Submitted {
                id: "n2".to_string(),
                status: ApplicationStatus::Draft,
            }
        );

        let outcome = desk.apply_intent(Intent::Settle).unwrap();
        assert_eq!(outcome, IntentOutcome::Settled { approved: 0 });
    }

    #[test]
    fn test_apply_submit_intent_propagates_validation() {
        let mut desk = desk(ApprovalMode::Immediate);
        let err = desk
            .apply_intent(Intent::Submit {
                draft: ApplicationDraft::default(),
                mode: SubmitMode::Create,
                existing: None,
            })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let desk = desk(ApprovalMode::Manual);
        let json = serde_json::to_value(desk.snapshot()).unwrap();
        assert_eq!(json["rules"].as_array().unwrap().len(), 8);
        assert_eq!(json["applications"][2]["status"], "Ready to Release");
        assert_eq!(json["rules"][0]["rewardPenaltyLevel"], "收派岗");
    }
}
