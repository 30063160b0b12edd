pub mod local_elevator {
    pub mod controller;
    pub mod elevio {
        pub mod buttons;
        pub mod elev;
    }
    pub mod fsm {
        pub mod direction_decider;
        pub mod door_timer;
        pub mod elevatorfsm;
        pub mod order_list;
    }
}

pub mod floor_panel {
    pub mod panel;
}

pub mod passenger {
    pub mod roster;
}

pub mod order_assigner {
    pub mod order_assigner;
}

pub mod system {
    pub mod elevator_system;
}

pub mod util {
    pub mod config;
    pub mod constants;
    pub mod logger;
}
