use super::*;

#[test]
fn status_round_trips_through_str() {
    for status in LibraryStatus::ALL {
        assert_eq!(LibraryStatus::from_str_loose(status.as_str()), status);
    }
}

#[test]
fn unknown_status_reads_as_unplayed() {
    assert_eq!(LibraryStatus::from_str_loose("wishlist"), LibraryStatus::Unplayed);
    assert_eq!(LibraryStatus::from_str_loose(" Completed "), LibraryStatus::Completed);
}

#[test]
fn sticky_statuses() {
    assert!(LibraryStatus::Completed.is_sticky());
    assert!(LibraryStatus::Replaying.is_sticky());
    assert!(LibraryStatus::Dropped.is_sticky());
    assert!(!LibraryStatus::Unplayed.is_sticky());
    assert!(!LibraryStatus::Playing.is_sticky());
}

#[test]
fn category_aliases() {
    assert_eq!(NewsCategory::from_str_loose("investment"), NewsCategory::Invest);
    assert_eq!(NewsCategory::from_str_loose("DEVS"), NewsCategory::Devs);
    assert_eq!(NewsCategory::from_str_loose("hardware"), NewsCategory::Hardware);
    assert_eq!(NewsCategory::from_str_loose("esports"), NewsCategory::General);
}
