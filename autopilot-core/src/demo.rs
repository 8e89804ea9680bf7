//! Built-in demo batch: seven contacts spanning every relationship state.

use crate::types::Event;
use chrono::{DateTime, Duration, Utc};

/// The identity demo events are written from.
pub const DEMO_SELF: &str = "You";

/// (days ago, extra hours ago, sent by self, contact, message)
type DemoRow = (i64, i64, bool, &'static str, &'static str);

const DEMO_ROWS: &[DemoRow] = &[
    // Sarah Chen: frequent, reciprocal, recent
    (0, 2, true, "Sarah Chen", "Hey, want to grab coffee later?"),
    (0, 1, false, "Sarah Chen", "Absolutely! 3pm works?"),
    (1, 5, false, "Sarah Chen", "Check out this article"),
    (1, 4, true, "Sarah Chen", "Love it, thanks!"),
    (3, 0, true, "Sarah Chen", "Movie tonight?"),
    (3, -1, false, "Sarah Chen", "I'm in!"),
    (5, 0, false, "Sarah Chen", "Happy Monday!"),
    (7, 0, true, "Sarah Chen", "Brunch Sunday?"),
    (7, -2, false, "Sarah Chen", "Yes please!"),
    (10, 0, false, "Sarah Chen", "How was your weekend?"),
    (12, 0, true, "Sarah Chen", "Great! We should hike soon"),
    (15, 0, false, "Sarah Chen", "Thinking of you, hope work is good"),
    (18, 0, true, "Sarah Chen", "It is! Let's catch up"),
    (20, 0, false, "Sarah Chen", "Dinner Friday?"),
    (25, 0, true, "Sarah Chen", "Sent you that recipe"),
    (35, 0, false, "Sarah Chen", "Miss our chats!"),
    (40, 0, true, "Sarah Chen", "Same here, let's plan something"),
    (45, 0, false, "Sarah Chen", "Coffee next week?"),
    (50, 0, true, "Sarah Chen", "Absolutely!"),
    // Marcus Rivera: regular but less frequent
    (2, 0, true, "Marcus Rivera", "How's the project going?"),
    (2, -1, false, "Marcus Rivera", "Almost done, thanks for asking"),
    (8, 0, false, "Marcus Rivera", "Can you review my PR?"),
    (8, -2, true, "Marcus Rivera", "On it!"),
    (14, 0, true, "Marcus Rivera", "Lunch tomorrow?"),
    (14, -3, false, "Marcus Rivera", "Sure thing"),
    (22, 0, false, "Marcus Rivera", "Thanks for the help yesterday"),
    (30, 0, true, "Marcus Rivera", "No problem!"),
    (38, 0, false, "Marcus Rivera", "Beers Friday?"),
    (45, 0, true, "Marcus Rivera", "Let's do it"),
    (52, 0, false, "Marcus Rivera", "Good chat today"),
    // Priya Patel: declining frequency
    (12, 0, true, "Priya Patel", "Hey! How are things?"),
    (12, -5, false, "Priya Patel", "Good! Busy with the move"),
    (25, 0, true, "Priya Patel", "Hope settling in is going well"),
    (35, 0, true, "Priya Patel", "Miss our coffee dates"),
    (36, 0, false, "Priya Patel", "Me too! Let's plan one"),
    (42, 0, false, "Priya Patel", "How's everything?"),
    (48, 0, true, "Priya Patel", "All good, you?"),
    (55, 0, false, "Priya Patel", "Hanging in there!"),
    // James O'Brien: no recent contact
    (45, 0, true, "James O'Brien", "Hey James, long time!"),
    (48, 0, false, "James O'Brien", "Yeah, been swamped"),
    (55, 0, true, "James O'Brien", "We should catch up"),
    // Luna Zhang: very reciprocal
    (1, 0, false, "Luna Zhang", "Morning! Ready for today?"),
    (1, -1, true, "Luna Zhang", "Born ready!"),
    (2, 0, true, "Luna Zhang", "Great session today"),
    (2, -1, false, "Luna Zhang", "Agreed! Next week same time?"),
    (4, 0, false, "Luna Zhang", "Found this resource for you"),
    (6, 0, true, "Luna Zhang", "This is amazing, thanks!"),
    (9, 0, false, "Luna Zhang", "Yoga Saturday?"),
    (9, -1, true, "Luna Zhang", "Yesss"),
    (13, 0, true, "Luna Zhang", "That was so fun"),
    (16, 0, false, "Luna Zhang", "When's the next one?"),
    (20, 0, true, "Luna Zhang", "This weekend!"),
    (28, 0, false, "Luna Zhang", "Count me in"),
    (35, 0, true, "Luna Zhang", "Always!"),
    (42, 0, false, "Luna Zhang", "Book club pick?"),
    (50, 0, true, "Luna Zhang", "I'll send one tonight"),
    // Derek Kim: self does most of the initiating
    (8, 0, true, "Derek Kim", "Hey Derek, how's the new job?"),
    (10, 0, false, "Derek Kim", "It's alright"),
    (20, 0, true, "Derek Kim", "Want to hang out this weekend?"),
    (32, 0, true, "Derek Kim", "Haven't heard from you in a while"),
    (33, 0, false, "Derek Kim", "Sorry, been busy"),
    (45, 0, true, "Derek Kim", "No worries, hope things are good"),
    (50, 0, true, "Derek Kim", "Let me know if you want to grab food"),
    // Aisha Williams: consistent, moderate
    (3, 0, false, "Aisha Williams", "Team outing next week?"),
    (3, -1, true, "Aisha Williams", "I'm down!"),
    (10, 0, true, "Aisha Williams", "That was fun"),
    (10, -2, false, "Aisha Williams", "We should do it more often"),
    (18, 0, false, "Aisha Williams", "Saw this and thought of you"),
    (18, -1, true, "Aisha Williams", "Haha love it"),
    (28, 0, true, "Aisha Williams", "Happy birthday!!"),
    (28, -1, false, "Aisha Williams", "Thank youuu!"),
    (38, 0, false, "Aisha Williams", "Meeting tomorrow?"),
    (45, 0, true, "Aisha Williams", "Confirmed!"),
    (52, 0, false, "Aisha Williams", "See you there"),
];

/// Demo events positioned relative to `as_of`.
pub fn demo_events(as_of: DateTime<Utc>) -> Vec<Event> {
    DEMO_ROWS
        .iter()
        .map(|&(days, hours, from_self, contact, message)| {
            let (sender, receiver) = if from_self {
                (DEMO_SELF, contact)
            } else {
                (contact, DEMO_SELF)
            };
            Event {
                timestamp: as_of - Duration::days(days) - Duration::hours(hours),
                sender: sender.to_string(),
                receiver: receiver.to_string(),
                message: message.to_string(),
            }
        })
        .collect()
}
