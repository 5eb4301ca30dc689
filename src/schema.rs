table! {
    appointments (id) {
        id -> Integer,
        full_name -> Text,
        email -> Text,
        phone_number -> Text,
        vehicle_make -> Text,
        vehicle_model -> Text,
        vehicle_year -> Integer,
        service_type -> Text,
        preferred_date -> Text,
        preferred_time -> Text,
        additional_notes -> Text,
        creation_date -> Timestamp,
        appointment_state -> Text,
    }
}
