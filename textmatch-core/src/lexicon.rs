//! Built-in marker sets and catalogs used when no configuration overrides them.
use crate::config::FaqEntry;
use crate::wellbeing::Theme;

/// Words counted as positive by the sentiment scorer.
pub fn default_positive_words() -> Vec<String> {
    [
        "calm", "good", "happy", "okay", "well", "better", "fine", "relieved", "hopeful", "relief",
        "great", "content", "peace",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Words counted as negative by the sentiment scorer.
pub fn default_negative_words() -> Vec<String> {
    [
        "sad", "depressed", "anxious", "anxiety", "stressed", "stress", "lonely", "angry", "hurt",
        "upset", "overwhelmed", "tired", "hopeless", "down",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Phrases that flag a message as a possible crisis.
pub fn default_crisis_phrases() -> Vec<String> {
    [
        "suicide",
        "kill myself",
        "want to die",
        "end my life",
        "hurt myself",
        "self-harm",
        "die by suicide",
        "cant go on",
        "can't go on",
        "i'll kill myself",
        "i will kill myself",
        "i want to die",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Conversation themes, in detection priority order.
pub fn default_themes() -> Vec<Theme> {
    vec![
        Theme::new("work", ["work", "job", "boss", "office", "colleague"]),
        Theme::new(
            "relationship",
            [
                "relationship", "partner", "breakup", "divorce", "boyfriend", "girlfriend", "wife",
                "husband",
            ],
        ),
        Theme::new(
            "study",
            [
                "exam", "study", "assignment", "exam stress", "grades", "school", "college",
                "university",
            ],
        ),
        Theme::new("health", ["sleep", "insomnia", "sick", "ill", "health", "pain"]),
    ]
}

/// Customer-service FAQ catalog.
pub fn default_faq() -> Vec<FaqEntry> {
    [
        (
            "What are your shipping times?",
            "Standard shipping takes 3-7 business days. Expedited options are available at checkout.",
        ),
        (
            "How do I track my order?",
            "You can track your order using the tracking number sent to your email after shipment.",
        ),
        (
            "What is the return policy?",
            "We accept returns within 30 days of delivery for most items in original condition.",
        ),
        (
            "How do I request a refund?",
            "Open a return request from your Orders page. Refunds go to the original payment method.",
        ),
        (
            "How can I change my shipping address?",
            "If your order hasn't shipped, update the shipping address from the Orders page.",
        ),
        (
            "How do I reset my password?",
            "Click 'Forgot password' on the login page and follow the emailed reset link.",
        ),
        (
            "Which payment methods do you accept?",
            "We accept credit/debit cards, PayPal, and major buy-now-pay-later services.",
        ),
        (
            "How can I cancel my order?",
            "Orders can be cancelled if they haven't shipped. Provide your order number to check.",
        ),
        (
            "Do you ship internationally?",
            "Yes, we ship to many countries. International shipping costs and duties may apply.",
        ),
        (
            "What warranty do your products have?",
            "Most products include a 1-year limited warranty. Check the product page for specifics.",
        ),
        (
            "My app is crashing or showing an error - what should I do?",
            "Clear the app cache, restart the device and update the app. Share the error if it persists.",
        ),
        (
            "How do I get an invoice for my purchase?",
            "Invoices are available in your account under Orders, Invoice.",
        ),
        (
            "Do you offer student discounts?",
            "We run occasional student promotions. Subscribe to the newsletter for announcements.",
        ),
        (
            "How do I contact a human agent?",
            "Reply 'escalate' with your order number and a short summary.",
        ),
    ]
    .into_iter()
    .map(|(question, answer)| FaqEntry::new(question, answer))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalize;

    #[test]
    fn test_sentiment_markers_are_single_tokens() {
        for word in default_positive_words().iter().chain(default_negative_words().iter()) {
            let normalized = normalize(word);
            assert_eq!(&normalized, word);
            assert!(!normalized.contains(' '));
        }
    }

    #[test]
    fn test_marker_sets_are_disjoint() {
        let negative = default_negative_words();
        assert!(default_positive_words().iter().all(|p| !negative.contains(p)));
    }

    #[test]
    fn test_default_faq_questions_are_distinct() {
        let faq = default_faq();
        assert_eq!(faq.len(), 14);
        for (i, a) in faq.iter().enumerate() {
            assert!(!a.question.trim().is_empty());
            assert!(faq[i + 1..].iter().all(|b| b.question != a.question));
        }
    }

    #[test]
    fn test_default_themes_order() {
        let names: Vec<String> = default_themes().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["work", "relationship", "study", "health"]);
    }
}
