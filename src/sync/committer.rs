use crate::models::{Feed, NewDocument};
use crate::store::{CommitResult, Notification, SessionError, Store, DOCUMENT_TYPENAME};
use crate::sync::fetcher::FetchedDocument;
use crate::sync::navigator::{CommitMode, Navigation};
use crate::sync::SyncError;

const NOTIFICATION_BODY: &str = "A new post has been added to your feed.";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CommitOutcome {
    Created,
    Updated,
    Unchanged,
}

pub fn commit(
    store: &dyn Store,
    feed: &Feed,
    navigation: Navigation,
    fetched: FetchedDocument,
) -> Result<CommitOutcome, SyncError> {
    match navigation.mode {
        CommitMode::Update {
            document_id,
            previous_body,
        } => {
            if previous_body == fetched.body {
                return Ok(CommitOutcome::Unchanged);
            }

            let result = store.update_feed_document(&document_id, &fetched.body)?;
            check_document_result(result)?;

            log::info!("Updated document {document_id} for feed {}", feed.id);

            Ok(CommitOutcome::Updated)
        }
        CommitMode::Create => {
            let document = NewDocument::builder()
                .feed(feed.id.clone())
                .author(fetched.author)
                .posted(fetched.posted)
                .body(fetched.body)
                .title(fetched.title)
                .url(navigation.next_url)
                .build();

            let result = store.create_feed_document(&document)?;
            check_document_result(result)?;

            log::info!("Fetched new document for feed {}", feed.id);

            if feed.notify {
                if let Err(err) = notify_creator(store, feed) {
                    // The document is already stored.
                    log::error!(
                        "Failed to notify {} about feed {}: {}",
                        feed.creator,
                        feed.id,
                        err
                    );
                }
            }

            Ok(CommitOutcome::Created)
        }
    }
}

fn check_document_result(result: CommitResult) -> Result<(), SyncError> {
    if result.is(DOCUMENT_TYPENAME) {
        return Ok(());
    }

    Err(SyncError::CommitTypeMismatch {
        message: result.message().to_string(),
        typename: result.typename,
    })
}

/// Only session failures count; whatever the store answers with is accepted.
fn notify_creator(store: &dyn Store, feed: &Feed) -> Result<(), SessionError> {
    let notification = Notification::builder()
        .username(feed.creator.clone())
        .title(feed.name.clone())
        .body(NOTIFICATION_BODY)
        .build();

    store.send_notification(&notification)?;

    Ok(())
}
