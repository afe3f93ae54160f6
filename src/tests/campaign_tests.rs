//! tests/campaign_tests.rs
//! Pipeline de envío contra repositorios en memoria.

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, sync::Arc};

    use actix_rt::test;

    use crate::errors::ServiceError;
    use crate::models::campaign_model::{CreateCampaignRequest, SendTo};
    use crate::models::sent_email_model::EmailStatus;
    use crate::services::segment_service::SegmentService;
    use crate::tests::support::{
        campaign_service, events, new_event_log, FakeMailSender, InMemoryStore,
    };

    fn request(contacts: &[i64], segments: &[i64]) -> CreateCampaignRequest {
        CreateCampaignRequest {
            name: "Test Campaign".to_string(),
            template_id: Some(1),
            send_to: SendTo {
                contacts: contacts.iter().copied().collect::<BTreeSet<_>>(),
                segments: segments.iter().copied().collect::<BTreeSet<_>>(),
            },
        }
    }

    fn store_with_template() -> (Arc<InMemoryStore>, crate::tests::support::EventLog) {
        let log = new_event_log();
        let store = Arc::new(InMemoryStore::new(log.clone()));
        store.seed_template(1, &[("Test subject", "Test content")]);
        (store, log)
    }

    #[test]
    async fn sends_campaign_to_contacts() {
        let (store, log) = store_with_template();
        store.seed_contact(1, "test@example.com");
        let sender = Arc::new(FakeMailSender::ok(log.clone()));
        let service = campaign_service(&store, sender.clone());

        let outcome = service.send(request(&[1], &[])).await.unwrap();

        let attempts = sender.attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].from, "onboarding@resend.dev");
        assert_eq!(attempts[0].to, "test@example.com");
        assert_eq!(attempts[0].subject, "Test subject");
        assert_eq!(attempts[0].content, "Test content");

        let writes = store.sent_email_writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].status, EmailStatus::Pending);
        assert_eq!(writes[1].status, EmailStatus::Sent);
        assert_eq!(writes[0].id, writes[1].id);

        let campaigns = store.campaigns();
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].name, "Test Campaign");
        assert_eq!(campaigns[0].contacts.len(), 1);
        assert_eq!(outcome.sent, 1);
        assert_eq!(outcome.failed, 0);
    }

    #[test]
    async fn records_pending_before_send_and_saves_campaign_last() {
        let (store, log) = store_with_template();
        store.seed_contact(1, "a@example.com");
        store.seed_contact(2, "b@example.com");
        let sender = Arc::new(FakeMailSender::ok(log.clone()));
        let service = campaign_service(&store, sender);

        service.send(request(&[1, 2], &[])).await.unwrap();

        assert_eq!(
            events(&log),
            vec![
                "write:sent_email:a@example.com:PENDING",
                "send:a@example.com",
                "write:sent_email:a@example.com:SENT",
                "write:sent_email:b@example.com:PENDING",
                "send:b@example.com",
                "write:sent_email:b@example.com:SENT",
                "write:campaign:Test Campaign",
            ]
        );
    }

    #[test]
    async fn transport_failure_is_recorded_not_raised() {
        let (store, log) = store_with_template();
        store.seed_contact(1, "test@example.com");
        let sender = Arc::new(FakeMailSender::failing_all(log.clone()));
        let service = campaign_service(&store, sender);

        let outcome = service.send(request(&[1], &[])).await.unwrap();

        let writes = store.sent_email_writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0].status, EmailStatus::Pending);
        let last = writes.last().unwrap();
        assert_eq!(last.status, EmailStatus::Failed);
        assert!(last
            .error_message
            .as_deref()
            .unwrap()
            .contains("Failed to send"));

        assert_eq!(store.campaigns().len(), 1);
        assert_eq!(store.campaigns()[0].contacts.len(), 1);
        assert_eq!((outcome.sent, outcome.failed), (0, 1));
    }

    #[test]
    async fn one_bad_recipient_does_not_stop_the_rest() {
        let (store, log) = store_with_template();
        store.seed_contact(1, "ok1@example.com");
        store.seed_contact(2, "broken@example.com");
        store.seed_contact(3, "ok2@example.com");
        let sender = Arc::new(FakeMailSender::failing_for(
            log.clone(),
            &["broken@example.com"],
        ));
        let service = campaign_service(&store, sender.clone());

        let outcome = service.send(request(&[1, 2, 3], &[])).await.unwrap();

        assert_eq!(sender.attempts().len(), 3);
        let records = store.sent_emails();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.status.is_terminal()));
        let failed: Vec<_> = records
            .iter()
            .filter(|r| r.status == EmailStatus::Failed)
            .map(|r| r.recipient.as_str())
            .collect();
        assert_eq!(failed, vec!["broken@example.com"]);
        assert_eq!((outcome.sent, outcome.failed), (2, 1));
        assert!(records.iter().all(|r| r.campaign_id == outcome.campaign.id));
    }

    #[test]
    async fn missing_contact_aborts_without_writes() {
        let (store, log) = store_with_template();
        let sender = Arc::new(FakeMailSender::ok(log.clone()));
        let service = campaign_service(&store, sender.clone());

        let err = service.send(request(&[1], &[])).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Contact with id = 1 not found");
        assert_eq!(store.write_count(), 0);
        assert!(sender.attempts().is_empty());
        assert!(events(&log).is_empty());
    }

    #[test]
    async fn missing_segment_aborts_even_if_contacts_resolve() {
        let (store, log) = store_with_template();
        store.seed_contact(1, "test@example.com");
        let sender = Arc::new(FakeMailSender::ok(log.clone()));
        let service = campaign_service(&store, sender.clone());

        let err = service.send(request(&[1], &[1])).await.unwrap_err();

        assert_eq!(err.to_string(), "Segment with id = 1 not found");
        assert!(events(&log).is_empty());
        assert!(store.campaigns().is_empty());
    }

    #[test]
    async fn reports_first_missing_contact_only() {
        let (store, log) = store_with_template();
        store.seed_contact(2, "present@example.com");
        let service = campaign_service(&store, Arc::new(FakeMailSender::ok(log.clone())));

        let err = service.send(request(&[5, 2, 3], &[])).await.unwrap_err();

        assert_eq!(err.to_string(), "Contact with id = 3 not found");
    }

    #[test]
    async fn template_without_content_cannot_be_sent() {
        let log = new_event_log();
        let store = Arc::new(InMemoryStore::new(log.clone()));
        store.seed_template(1, &[]);
        store.seed_contact(1, "test@example.com");
        let service = campaign_service(&store, Arc::new(FakeMailSender::ok(log.clone())));

        let err = service.send(request(&[1], &[])).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Template content with template_id = 1 not found"
        );
        assert!(events(&log).is_empty());
    }

    #[test]
    async fn uses_latest_content_version() {
        let log = new_event_log();
        let store = Arc::new(InMemoryStore::new(log.clone()));
        store.seed_template(1, &[("old subject", "old"), ("new subject", "new")]);
        store.seed_contact(1, "test@example.com");
        let sender = Arc::new(FakeMailSender::ok(log.clone()));
        let service = campaign_service(&store, sender.clone());

        service.send(request(&[1], &[])).await.unwrap();

        assert_eq!(sender.attempts()[0].subject, "new subject");
        assert_eq!(sender.attempts()[0].content, "new");
    }

    #[test]
    async fn sends_campaign_to_segments() {
        let (store, log) = store_with_template();
        let contact = store.seed_contact(1, "test@example.com");
        store.seed_segment(1, vec![contact]);
        let sender = Arc::new(FakeMailSender::ok(log.clone()));
        let service = campaign_service(&store, sender.clone());

        service.send(request(&[], &[1])).await.unwrap();

        assert_eq!(sender.attempts().len(), 1);
        assert_eq!(store.sent_email_writes().len(), 2);
        let campaigns = store.campaigns();
        assert_eq!(campaigns[0].name, "Test Campaign");
        assert_eq!(campaigns[0].segments.len(), 1);
        assert_eq!(campaigns[0].contacts.len(), 1);
    }

    #[test]
    async fn overlapping_contacts_and_segments_are_sent_once() {
        let (store, log) = store_with_template();
        let a = store.seed_contact(1, "a@example.com");
        let b = store.seed_contact(2, "b@example.com");
        let c = store.seed_contact(3, "c@example.com");
        store.seed_segment(10, vec![a.clone(), b.clone()]);
        store.seed_segment(11, vec![b, c]);
        let sender = Arc::new(FakeMailSender::ok(log.clone()));
        let service = campaign_service(&store, sender.clone());

        let outcome = service.send(request(&[1], &[10, 11])).await.unwrap();

        let mut sent_to: Vec<_> = sender.attempts().into_iter().map(|m| m.to).collect();
        sent_to.sort();
        assert_eq!(sent_to, vec!["a@example.com", "b@example.com", "c@example.com"]);
        assert_eq!(store.sent_email_writes().len(), 6);
        assert_eq!(store.sent_emails().len(), 3);
        assert_eq!(outcome.campaign.contacts.len(), 3);
        assert_eq!(outcome.campaign.segments.len(), 2);
    }

    #[test]
    async fn rejects_requests_without_template_or_recipients() {
        let (store, log) = store_with_template();
        let service = campaign_service(&store, Arc::new(FakeMailSender::ok(log.clone())));

        let mut no_template = request(&[1], &[]);
        no_template.template_id = None;
        let err = service.send(no_template).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = service.send(request(&[], &[])).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(events(&log).is_empty());
    }

    #[test]
    async fn lists_delivery_records_for_a_campaign() {
        let (store, log) = store_with_template();
        store.seed_contact(1, "test@example.com");
        let service = campaign_service(&store, Arc::new(FakeMailSender::ok(log.clone())));

        let outcome = service.send(request(&[1], &[])).await.unwrap();
        let records = service.sent_emails(&outcome.campaign.id).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, EmailStatus::Sent);
        assert!(service.sent_emails("missing").await.unwrap_err().is_not_found());
    }

    #[test]
    async fn segment_members_are_read_when_sending() {
        let (store, log) = store_with_template();
        let a = store.seed_contact(1, "a@example.com");
        store.seed_contact(2, "b@example.com");
        store.seed_segment(10, vec![a]);
        let segments = SegmentService::new(store.clone(), store.clone(), store.clone(), store.clone());
        segments
            .add_contacts(10, &BTreeSet::from(["b@example.com".to_string()]))
            .await
            .unwrap();

        let sender = Arc::new(FakeMailSender::ok(log.clone()));
        let service = campaign_service(&store, sender.clone());
        let outcome = service.send(request(&[], &[10])).await.unwrap();

        let mut sent_to: Vec<_> = sender.attempts().into_iter().map(|m| m.to).collect();
        sent_to.sort();
        assert_eq!(sent_to, vec!["a@example.com", "b@example.com"]);
        assert_eq!(outcome.campaign.contacts.len(), 2);
        assert_eq!(outcome.campaign.segments[0].contacts.len(), 2);
    }
}
