//! [`Query`] collection related to a single [`Hotel`].

use common::operations::By;

use crate::{
    domain::{hotel, Hotel, Policy, RoomType},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Hotel`]s passing a [`read::hotel::Filter`], in its
/// [`read::hotel::Ordering`].
pub type List = DatabaseQuery<By<Vec<Hotel>, read::hotel::Filter>>;

/// Queries a [`Hotel`] by its [`hotel::Id`].
pub type ById = DatabaseQuery<By<Option<Hotel>, hotel::Id>>;

/// Queries [`RoomType`]s of a [`Hotel`], cheapest first.
pub type RoomTypes = DatabaseQuery<By<Vec<RoomType>, hotel::Id>>;

/// Queries the cancellation [`Policy`] of a [`Hotel`].
pub type CancellationPolicy = DatabaseQuery<By<Option<Policy>, hotel::Id>>;

#[cfg(test)]
mod spec {
    use common::{operations::Insert, Handler as _};

    use crate::{
        domain::hotel::Stars,
        read::hotel::{spec::hotel, Filter},
        spec::service,
    };

    use super::List;

    #[tokio::test]
    async fn lists_filtered_hotels_in_order() {
        let svc = service();
        let db = svc.database();
        let lyon = hotel("Hôtel Central Lyon", "Lyon", 4);
        let nice = hotel("Hôtel Plage Nice", "Nice", 3);
        let paris = hotel("Hôtel Plaza Paris", "Paris", 5);
        for h in [&paris, &nice, &lyon] {
            db.execute(Insert(h.clone())).await.unwrap();
        }

        let all = svc.execute(List::by(Filter::default())).await.unwrap();
        let ids = all.iter().map(|h| h.id).collect::<Vec<_>>();
        assert_eq!(ids, [lyon.id, nice.id, paris.id]);

        let filter = Filter {
            ordering: "-stars".parse().unwrap(),
            ..Filter::default()
        };
        let all = svc.execute(List::by(filter)).await.unwrap();
        let ids = all.iter().map(|h| h.id).collect::<Vec<_>>();
        assert_eq!(ids, [paris.id, lyon.id, nice.id]);

        let filter = Filter {
            stars: Stars::new(3),
            search: Some("plage".into()),
            ..Filter::default()
        };
        let found = svc.execute(List::by(filter)).await.unwrap();
        let ids = found.iter().map(|h| h.id).collect::<Vec<_>>();
        assert_eq!(ids, [nice.id]);
    }
}
