//! Ordered target floors of a single car. Floors are served strictly in the order they were
//! added, duplicates are dropped on insertion.
use serde;
use std::vec::Vec;

use crate::local_elevator::elevio::elev::Floor;

/// Utility struct for managing the target floors of one car
///
/// # Example
/// ```rust
/// use elevator::local_elevator::fsm::order_list::OrderList;
/// let mut orders = OrderList::new(1, 5);
/// orders.add_order(3);
/// orders.add_order(3);
/// assert_eq!(orders.as_slice(), &[3]);
/// ```
#[derive(PartialEq, Clone, Debug, serde::Serialize, serde::Deserialize, Hash)]
pub struct OrderList {
    min_floor: Floor,
    max_floor: Floor,
    targets: Vec<Floor>,
}

impl OrderList {
    ///creates a new, empty instance of an OrderList
    ///
    /// * `min_floor`, `max_floor` - The range of floors that are allowed as targets
    pub fn new(min_floor: Floor, max_floor: Floor) -> OrderList {
        OrderList {
            min_floor: min_floor,
            max_floor: max_floor,
            targets: Vec::new(),
        }
    }

    pub fn in_range(&self, floor: Floor) -> bool {
        return floor >= self.min_floor && floor <= self.max_floor;
    }

    /// Appends `floor` to the back of the list.
    ///
    /// Returns `false` if the floor was out of range or already present.
    pub fn add_order(&mut self, floor: Floor) -> bool {
        if !self.in_range(floor) || self.contains(floor) {
            return false;
        }
        self.targets.push(floor);
        return true;
    }

    pub fn contains(&self, floor: Floor) -> bool {
        return self.targets.iter().any(|&f| f == floor);
    }

    /// The floor that is served next
    pub fn next(&self) -> Option<Floor> {
        return self.targets.first().copied();
    }

    /// Removes the front of the list after it has been served
    pub fn pop_served(&mut self) -> Option<Floor> {
        if self.targets.is_empty() {
            return None;
        }
        return Some(self.targets.remove(0));
    }

    pub fn clear_all_orders(&mut self) {
        self.targets.clear();
    }

    pub fn is_empty(&self) -> bool {
        return self.targets.is_empty();
    }

    pub fn len(&self) -> usize {
        return self.targets.len();
    }

    pub fn as_slice(&self) -> &[Floor] {
        return &self.targets;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_adds_each_floor_once() {
        let mut orders = OrderList::new(1, 5);
        assert!(orders.add_order(4));
        assert!(!orders.add_order(4));
        assert_eq!(orders.as_slice(), &[4]);
    }

    #[test]
    fn it_drops_floors_out_of_range() {
        let mut orders = OrderList::new(1, 5);
        assert!(!orders.add_order(0));
        assert!(!orders.add_order(6));
        assert!(orders.is_empty());
    }

    #[test]
    fn it_keeps_insertion_order() {
        let mut orders = OrderList::new(1, 5);
        orders.add_order(3);
        orders.add_order(1);
        orders.add_order(5);
        assert_eq!(orders.next(), Some(3));
        assert_eq!(orders.pop_served(), Some(3));
        assert_eq!(orders.pop_served(), Some(1));
        assert_eq!(orders.as_slice(), &[5]);
    }

    #[test]
    fn it_clears_all_orders() {
        let mut orders = OrderList::new(-2, 5);
        orders.add_order(-2);
        orders.add_order(2);
        orders.clear_all_orders();
        assert_eq!(orders.next(), None);
        assert_eq!(orders.pop_served(), None);
    }
}
