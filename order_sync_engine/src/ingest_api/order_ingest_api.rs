use std::fmt::Debug;

use log::*;

use crate::{
    db_types::NewOrderRow,
    ingest_api::{
        errors::{IngestError, OrderMappingError},
        ingest_objects::IngestSummary,
    },
    traits::{OrderPage, OrderSource, OrderStore},
};

/// `OrderIngestApi` pulls every page of orders from an [`OrderSource`] and writes them, one row at a time, to an
/// [`OrderStore`].
///
/// Raw records are turned into rows by the mapper `M`. The source's record type is opaque to the engine, so the mapper
/// is supplied by whoever knows both sides.
pub struct OrderIngestApi<S, B, M> {
    source: S,
    store: B,
    mapper: M,
}

impl<S, B, M> Debug for OrderIngestApi<S, B, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderIngestApi")
    }
}

impl<S, B, M> OrderIngestApi<S, B, M> {
    pub fn new(source: S, store: B, mapper: M) -> Self {
        Self { source, store, mapper }
    }

    pub fn store(&self) -> &B {
        &self.store
    }
}

impl<S, B, M> OrderIngestApi<S, B, M>
where
    S: OrderSource,
    B: OrderStore,
    M: Fn(S::Order) -> Result<NewOrderRow, OrderMappingError>,
{
    /// Runs a complete sync.
    ///
    /// One access token is obtained and used for every page. Pages are fetched in sequence, following the `NextToken`
    /// cursor, until a page is empty or carries no cursor. Each order is mapped and inserted before the next one is
    /// looked at.
    ///
    /// The first failure of any kind ends the run. Rows inserted up to that point stay in the store.
    pub async fn run(&self) -> Result<IngestSummary, IngestError> {
        let mut summary = IngestSummary::default();
        match self.ingest(&mut summary).await {
            Ok(()) => {
                info!("🔄️ Order sync complete. {summary}");
                Ok(summary)
            },
            Err(e) => {
                error!("🔄️ Order sync aborted after {summary}. {e}");
                Err(e)
            },
        }
    }

    async fn ingest(&self, summary: &mut IngestSummary) -> Result<(), IngestError> {
        let access_token = self.source.access_token().await?;
        info!("🔑️ Access token obtained");
        self.store.ensure_schema().await?;
        let mut cursor: Option<String> = None;
        loop {
            trace!("📦️ Fetching page {} (cursor: {cursor:?})", summary.pages_fetched + 1);
            let page = self.source.fetch_page(&access_token, cursor.take()).await?;
            summary.pages_fetched += 1;
            if page.is_empty() {
                info!("📦️ Page {} contains no orders", summary.pages_fetched);
                return Ok(());
            }
            let OrderPage { orders, next_token } = page;
            info!("📦️ Page {} contains {} orders", summary.pages_fetched, orders.len());
            for raw in orders {
                let row = (self.mapper)(raw)?;
                self.store.insert_order(row).await?;
                summary.orders_inserted += 1;
            }
            match next_token {
                Some(token) => cursor = Some(token),
                None => {
                    debug!("📦️ No NextToken on page {}", summary.pages_fetched);
                    return Ok(());
                },
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::{collections::VecDeque, sync::Mutex};

    use mockall::{mock, predicate::eq, Sequence};
    use osync_common::Secret;

    use super::*;
    use crate::{
        db_types::OrderId,
        traits::{OrderSourceError, OrderStoreError},
    };

    mock! {
        pub Store {}
        impl OrderStore for Store {
            async fn ensure_schema(&self) -> Result<(), OrderStoreError>;
            async fn insert_order(&self, order: NewOrderRow) -> Result<(), OrderStoreError>;
        }
    }

    /// Serves pre-baked pages and remembers the cursor of every fetch.
    struct ScriptedSource {
        token: Result<Secret<String>, OrderSourceError>,
        pages: Mutex<VecDeque<Result<OrderPage<String>, OrderSourceError>>>,
        cursors: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<OrderPage<String>, OrderSourceError>>) -> Self {
            Self {
                token: Ok(Secret::new("Atza|token".to_string())),
                pages: Mutex::new(pages.into()),
                cursors: Mutex::new(Vec::new()),
            }
        }

        fn with_auth_failure(mut self, message: &str) -> Self {
            self.token = Err(OrderSourceError::AuthError(message.to_string()));
            self
        }

        fn cursors(&self) -> Vec<Option<String>> {
            self.cursors.lock().unwrap().clone()
        }
    }

    impl OrderSource for ScriptedSource {
        type Order = String;

        async fn access_token(&self) -> Result<Secret<String>, OrderSourceError> {
            self.token.clone()
        }

        async fn fetch_page(
            &self,
            access_token: &Secret<String>,
            cursor: Option<String>,
        ) -> Result<OrderPage<String>, OrderSourceError> {
            assert_eq!(access_token.reveal(), "Atza|token");
            self.cursors.lock().unwrap().push(cursor);
            self.pages.lock().unwrap().pop_front().expect("Fetched more pages than were scripted")
        }
    }

    fn map_id(id: String) -> Result<NewOrderRow, OrderMappingError> {
        if id.trim().is_empty() {
            return Err(OrderMappingError::new("AmazonOrderId is missing"));
        }
        Ok(NewOrderRow::new(OrderId::from(id)))
    }

    fn page(ids: &[&str], next: Option<&str>) -> Result<OrderPage<String>, OrderSourceError> {
        Ok(OrderPage::new(ids.iter().map(|s| s.to_string()).collect(), next.map(String::from)))
    }

    fn store_with_schema() -> MockStore {
        let mut store = MockStore::new();
        store.expect_ensure_schema().times(1).returning(|| Ok(()));
        store
    }

    fn expect_inserts(store: &mut MockStore, ids: &[&'static str]) {
        let mut seq = Sequence::new();
        for id in ids {
            let expected = NewOrderRow::new(OrderId::from(*id));
            store.expect_insert_order().with(eq(expected)).times(1).in_sequence(&mut seq).returning(|_| Ok(()));
        }
    }

    #[tokio::test]
    async fn single_page_without_next_token() {
        let source = ScriptedSource::new(vec![page(&["a", "b"], None)]);
        let mut store = store_with_schema();
        expect_inserts(&mut store, &["a", "b"]);
        let api = OrderIngestApi::new(source, store, map_id);
        let summary = api.run().await.expect("Run failed");
        assert_eq!(summary, IngestSummary { pages_fetched: 1, orders_inserted: 2 });
        assert_eq!(api.source.cursors(), vec![None]);
    }

    #[tokio::test]
    async fn empty_page_ends_the_run_even_with_a_cursor() {
        let source = ScriptedSource::new(vec![page(&[], Some("ignored"))]);
        let store = store_with_schema();
        let api = OrderIngestApi::new(source, store, map_id);
        let summary = api.run().await.expect("Run failed");
        assert_eq!(summary, IngestSummary { pages_fetched: 1, orders_inserted: 0 });
        assert_eq!(api.source.cursors(), vec![None]);
    }

    #[tokio::test]
    async fn empty_page_after_a_cursor_ends_the_run() {
        let source = ScriptedSource::new(vec![page(&["a"], Some("t1")), page(&[], Some("t2"))]);
        let mut store = store_with_schema();
        expect_inserts(&mut store, &["a"]);
        let api = OrderIngestApi::new(source, store, map_id);
        let summary = api.run().await.expect("Run failed");
        assert_eq!(summary, IngestSummary { pages_fetched: 2, orders_inserted: 1 });
        assert_eq!(api.source.cursors(), vec![None, Some("t1".to_string())]);
    }

    #[tokio::test]
    async fn follows_next_token_across_pages() {
        let source = ScriptedSource::new(vec![
            page(&["1"], Some("t1")),
            page(&["2"], Some("t2")),
            page(&["3"], Some("t3")),
            page(&["4"], None),
        ]);
        let mut store = store_with_schema();
        expect_inserts(&mut store, &["1", "2", "3", "4"]);
        let api = OrderIngestApi::new(source, store, map_id);
        let summary = api.run().await.expect("Run failed");
        assert_eq!(summary, IngestSummary { pages_fetched: 4, orders_inserted: 4 });
        let expected = vec![None, Some("t1".to_string()), Some("t2".to_string()), Some("t3".to_string())];
        assert_eq!(api.source.cursors(), expected);
    }

    #[tokio::test]
    async fn two_pages_three_orders() {
        let source = ScriptedSource::new(vec![page(&["A1", "A2"], Some("X")), page(&["A3"], None)]);
        let mut store = store_with_schema();
        expect_inserts(&mut store, &["A1", "A2", "A3"]);
        let api = OrderIngestApi::new(source, store, map_id);
        let summary = api.run().await.expect("Run failed");
        assert_eq!(summary, IngestSummary { pages_fetched: 2, orders_inserted: 3 });
        assert_eq!(api.source.cursors(), vec![None, Some("X".to_string())]);
    }

    #[tokio::test]
    async fn auth_failure_stops_before_any_fetch() {
        let source = ScriptedSource::new(vec![page(&["a"], None)]).with_auth_failure("Error 401. invalid_grant");
        let mut store = MockStore::new();
        store.expect_ensure_schema().never();
        store.expect_insert_order().never();
        let api = OrderIngestApi::new(source, store, map_id);
        match api.run().await {
            Err(IngestError::AuthError(msg)) => assert!(msg.contains("401")),
            other => panic!("Expected AuthError, got {other:?}"),
        }
        assert!(api.source.cursors().is_empty());
    }

    #[tokio::test]
    async fn fetch_error_aborts_after_earlier_pages_are_saved() {
        let source = ScriptedSource::new(vec![
            page(&["a"], Some("t1")),
            Err(OrderSourceError::FetchError("Error 429. QuotaExceeded".to_string())),
        ]);
        let mut store = store_with_schema();
        expect_inserts(&mut store, &["a"]);
        let api = OrderIngestApi::new(source, store, map_id);
        match api.run().await {
            Err(IngestError::FetchError(msg)) => assert!(msg.contains("QuotaExceeded")),
            other => panic!("Expected FetchError, got {other:?}"),
        }
        assert_eq!(api.source.cursors().len(), 2);
    }

    #[tokio::test]
    async fn mapping_error_aborts_the_run() {
        let source = ScriptedSource::new(vec![page(&["a", " ", "c"], Some("t1"))]);
        let mut store = store_with_schema();
        expect_inserts(&mut store, &["a"]);
        let api = OrderIngestApi::new(source, store, map_id);
        let err = api.run().await.expect_err("Run should fail");
        assert!(matches!(err, IngestError::MappingError(_)));
        assert_eq!(api.source.cursors(), vec![None]);
    }

    #[tokio::test]
    async fn duplicate_order_aborts_the_run() {
        let source = ScriptedSource::new(vec![page(&["a", "b", "c"], None)]);
        let mut store = store_with_schema();
        let mut seq = Sequence::new();
        store
            .expect_insert_order()
            .with(eq(NewOrderRow::new(OrderId::from("a"))))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_insert_order()
            .with(eq(NewOrderRow::new(OrderId::from("b"))))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|o| Err(OrderStoreError::DuplicateOrder(o.amazon_order_id)));
        let api = OrderIngestApi::new(source, store, map_id);
        match api.run().await {
            Err(IngestError::DuplicateOrder(id)) => assert_eq!(id.as_str(), "b"),
            other => panic!("Expected DuplicateOrder, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn schema_failure_is_a_persistence_error() {
        let source = ScriptedSource::new(vec![page(&["a"], None)]);
        let mut store = MockStore::new();
        store.expect_ensure_schema().times(1).returning(|| Err(OrderStoreError::DatabaseError("disk I/O".into())));
        store.expect_insert_order().never();
        let api = OrderIngestApi::new(source, store, map_id);
        let err = api.run().await.expect_err("Run should fail");
        assert!(matches!(err, IngestError::PersistenceError(ref s) if s == "disk I/O"));
        assert!(api.source.cursors().is_empty());
    }
}
