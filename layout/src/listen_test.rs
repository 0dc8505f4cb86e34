use super::*;

#[test]
fn new_host_has_no_subscriptions() {
    let host = EventHost::new();
    assert_eq!(host.active(Channel::PointerMove), 0);
    assert_eq!(host.active(Channel::PointerUp), 0);
    assert_eq!(host.active(Channel::ContainerSize), 0);
}

#[test]
fn subscribe_counts_per_channel() {
    let host = EventHost::new();
    let a = host.subscribe(Channel::PointerMove);
    let b = host.subscribe(Channel::PointerMove);
    let c = host.subscribe(Channel::ContainerSize);
    assert_eq!(host.active(Channel::PointerMove), 2);
    assert_eq!(host.active(Channel::PointerUp), 0);
    assert_eq!(host.active(Channel::ContainerSize), 1);
    assert_eq!(a.channel(), Channel::PointerMove);
    drop((a, b, c));
}

#[test]
fn drop_detaches() {
    let host = EventHost::new();
    let sub = host.subscribe(Channel::PointerUp);
    assert_eq!(host.active(Channel::PointerUp), 1);
    drop(sub);
    assert_eq!(host.active(Channel::PointerUp), 0);
}

#[test]
fn clones_share_counters() {
    let host = EventHost::new();
    let other = host.clone();
    let sub = other.subscribe(Channel::ContainerSize);
    assert_eq!(host.active(Channel::ContainerSize), 1);
    drop(sub);
    assert_eq!(host.active(Channel::ContainerSize), 0);
}
