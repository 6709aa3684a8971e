//! Reminder text for every keyword variant.
//!
//! `CARDNAME` stands for the object's name; hosts substitute it when
//! rendering.

use super::grammar::{Keyword, Magnitude};

fn plural(n: u32, one: &str, many: &str) -> String {
    if n == 1 {
        format!("a {}", one)
    } else {
        format!("{} {}", n, many)
    }
}

fn counters(n: u32, kind: &str) -> String {
    if n == 1 {
        format!("a {} counter", kind)
    } else {
        format!("{} {} counters", n, kind)
    }
}

/// Reminder text for a keyword.
///
/// ```
/// use ccg_layers::keywords::{reminder_text, Keyword};
///
/// let text = reminder_text(&Keyword::Bushido(2));
/// assert!(text.contains("+2/+2"));
/// ```
#[must_use]
pub fn reminder_text(keyword: &Keyword) -> String {
    use Keyword as K;
    match keyword {
        K::Flying => "This creature can't be blocked except by creatures with flying or reach.".into(),
        K::FirstStrike => "This creature deals combat damage before creatures without first strike.".into(),
        K::DoubleStrike => "This creature deals both first-strike and regular combat damage.".into(),
        K::Deathtouch => "Any amount of damage this deals to a creature is enough to destroy it.".into(),
        K::Defender => "This creature can't attack.".into(),
        K::Fear => "This creature can't be blocked except by artifact creatures and/or black creatures.".into(),
        K::Flash => "You may cast this spell any time you could cast an instant.".into(),
        K::Haste => "This creature can attack and {T} as soon as it comes under your control.".into(),
        K::Hexproof => "This can't be the target of spells or abilities your opponents control.".into(),
        K::Indestructible => "Damage and effects that say \"destroy\" don't destroy this.".into(),
        K::Intimidate => "This creature can't be blocked except by artifact creatures and/or creatures that share a color with it.".into(),
        K::Lifelink => "Damage dealt by this also causes you to gain that much life.".into(),
        K::Menace => "This creature can't be blocked except by two or more creatures.".into(),
        K::Reach => "This creature can block creatures with flying.".into(),
        K::Shroud => "This can't be the target of spells or abilities.".into(),
        K::Trample => "This creature can deal excess combat damage to the player or planeswalker it's attacking.".into(),
        K::Vigilance => "Attacking doesn't cause this creature to tap.".into(),
        K::Shadow => "This creature can block or be blocked by only creatures with shadow.".into(),
        K::Horsemanship => "This creature can't be blocked except by creatures with horsemanship.".into(),
        K::Skulk => "This creature can't be blocked by creatures with greater power.".into(),
        K::Banding => "Any creatures with banding, and up to one without, can attack in a band.".into(),
        K::Infect => "This creature deals damage to creatures in the form of -1/-1 counters and to players in the form of poison counters.".into(),
        K::Wither => "This deals damage to creatures in the form of -1/-1 counters.".into(),
        K::SplitSecond => "As long as this spell is on the stack, players can't cast spells or activate abilities that aren't mana abilities.".into(),
        K::Phasing => "This phases in or out before you untap during each of your untap steps.".into(),
        K::Fuse => "You may cast one or both halves of this card from your hand.".into(),
        K::Convoke => "Your creatures can help cast this spell.".into(),
        K::Delve => "Each card you exile from your graveyard while casting this spell pays for {1}.".into(),
        K::Improvise => "Your artifacts can help cast this spell.".into(),
        K::Assist => "Another player can pay up to {X} of this spell's cost.".into(),
        K::Partner => "You can have two commanders if both have partner.".into(),
        K::Protection(q) => format!("This can't be blocked, targeted, dealt damage, enchanted, or equipped by anything {}.", q),
        K::Landwalk(land) => format!("This creature can't be blocked as long as defending player controls a {}.", land),
        K::Toxic(n) => format!("Players dealt combat damage by this creature also get {}.", plural(*n, "poison counter", "poison counters")),
        K::Enchant(t) => format!("Enchant {}", t),
        K::Changeling => "This object is every creature type.".into(),
        K::Devoid => "This card has no color.".into(),
        K::Affinity(t) => format!("This spell costs {{1}} less to cast for each {} you control.", t),

        K::Bushido(n) => format!("Whenever this creature blocks or becomes blocked, it gets +{n}/+{n} until end of turn."),
        K::Rampage(n) => format!("Whenever this creature becomes blocked, it gets +{n}/+{n} until end of turn for each creature blocking it beyond the first."),
        K::Flanking => "Whenever a creature without flanking blocks this creature, the blocking creature gets -1/-1 until end of turn.".into(),
        K::Bloodthirst(n) => format!("If an opponent was dealt damage this turn, this creature enters with {} on it.", counters(*n, "+1/+1")),
        K::Modular(Magnitude::Sunburst) => "This enters with a +1/+1 counter on it for each color of mana spent to cast it. When it dies, you may put its +1/+1 counters on target artifact creature.".into(),
        K::Modular(m) => format!("This creature enters with {} +1/+1 counters on it. When it dies, you may put its +1/+1 counters on target artifact creature.", m),
        K::Graft(n) => format!("This creature enters with {} on it. Whenever another creature enters, you may move a +1/+1 counter from this creature onto it.", counters(*n, "+1/+1")),
        K::Evolve => "Whenever a creature you control enters, if that creature has greater power or toughness than this creature, put a +1/+1 counter on this creature.".into(),
        K::Exalted => "Whenever a creature you control attacks alone, that creature gets +1/+1 until end of turn.".into(),
        K::Undying => "When this creature dies, if it had no +1/+1 counters on it, return it to the battlefield under its owner's control with a +1/+1 counter on it.".into(),
        K::Persist => "When this creature dies, if it had no -1/-1 counters on it, return it to the battlefield under its owner's control with a -1/-1 counter on it.".into(),
        K::Cascade => "When you cast this spell, exile cards from the top of your library until you exile a nonland card that costs less. You may cast it without paying its mana cost. Put the exiled cards on the bottom in a random order.".into(),
        K::Storm => "When you cast this spell, copy it for each spell cast before it this turn. You may choose new targets for the copies.".into(),
        K::Gravestorm => "When you cast this spell, copy it for each permanent put into a graveyard this turn. You may choose new targets for the copies.".into(),
        K::Ripple(n) => format!("When you cast this spell, you may reveal the top {n} cards of your library. You may cast spells with the same name revealed this way without paying their mana costs. Put the rest on the bottom of your library."),
        K::Vanishing(n) => format!("This enters with {}. At the beginning of your upkeep, remove a time counter from it. When the last is removed, sacrifice it.", counters(*n, "time")),
        K::Fading(n) => format!("This enters with {}. At the beginning of your upkeep, remove a fade counter from it. If you can't, sacrifice it.", counters(*n, "fade")),
        K::Dredge(n) => format!("If you would draw a card, you may mill {n} cards instead. If you do, return this card from your graveyard to your hand."),
        K::Annihilator(n) => format!("Whenever this creature attacks, defending player sacrifices {}.", plural(*n, "permanent", "permanents")),
        K::Afflict(n) => format!("Whenever this creature becomes blocked, defending player loses {n} life."),
        K::Afterlife(n) => format!("When this creature dies, create {} 1/1 white and black Spirit creature token{} with flying.", n, if *n == 1 { "" } else { "s" }),
        K::Mentor => "Whenever this creature attacks, put a +1/+1 counter on target attacking creature with lesser power.".into(),
        K::Training => "Whenever this creature attacks with another creature with greater power, put a +1/+1 counter on this creature.".into(),
        K::Exploit => "When this creature enters, you may sacrifice a creature.".into(),
        K::Extort => "Whenever you cast a spell, you may pay {W/B}. If you do, each opponent loses 1 life and you gain that much life.".into(),
        K::Fabricate(n) => format!("When this creature enters, put {} on it or create {} 1/1 colorless Servo artifact creature token{}.", counters(*n, "+1/+1"), n, if *n == 1 { "" } else { "s" }),
        K::Renown(n) => format!("When this creature deals combat damage to a player, if it isn't renowned, put {} on it and it becomes renowned.", counters(*n, "+1/+1")),
        K::Myriad => "Whenever this creature attacks, for each opponent other than defending player, you may create a token copy that's tapped and attacking that player. Exile the tokens at end of combat.".into(),
        K::Melee => "Whenever this creature attacks, it gets +1/+1 until end of turn for each opponent you attacked this combat.".into(),
        K::Dethrone => "Whenever this creature attacks the player with the most life or tied for most life, put a +1/+1 counter on it.".into(),
        K::Soulshift(n) => format!("When this creature dies, you may return target Spirit card with mana value {n} or less from your graveyard to your hand."),
        K::Riot => "This creature enters with your choice of a +1/+1 counter or haste.".into(),
        K::Unleash => "You may have this creature enter with a +1/+1 counter on it. It can't block as long as it has a +1/+1 counter on it.".into(),
        K::Devour(n) => format!("As this enters, you may sacrifice any number of creatures. This creature enters with {n} times that many +1/+1 counters."),
        K::Tribute(n) => format!("As this creature enters, an opponent of your choice may put {} on it.", counters(*n, "+1/+1")),
        K::Sunburst => "This enters with a +1/+1 counter on it if it's a creature, or a charge counter if not, for each color of mana spent to cast it.".into(),
        K::Absorb(n) => format!("If a source would deal damage to this creature, prevent {n} of that damage."),
        K::Provoke => "Whenever this creature attacks, you may have target creature defending player controls untap and block it if able.".into(),
        K::Poisonous(n) => format!("Whenever this creature deals combat damage to a player, that player gets {}.", plural(*n, "poison counter", "poison counters")),
        K::Frenzy(n) => format!("Whenever this creature attacks and isn't blocked, it gets +{n}/+0 until end of turn."),
        K::BattleCry => "Whenever this creature attacks, each other attacking creature gets +1/+0 until end of turn.".into(),
        K::LivingWeapon => "When this Equipment enters, create a 0/0 black Phyrexian Germ creature token, then attach this to it.".into(),
        K::Decayed => "This creature can't block. When it attacks, sacrifice it at end of combat.".into(),
        K::Hideaway(n) => format!("When this permanent enters, look at the top {n} cards of your library, exile one face down, then put the rest on the bottom in a random order."),
        K::Enlist => "As this creature attacks, you may tap a nonattacking creature you control without summoning sickness. When you do, add its power to this creature's until end of turn.".into(),
        K::Backup(n) => format!("When this creature enters, put {} on target creature. If that's another creature, it gains the following abilities until end of turn.", counters(*n, "+1/+1")),
        K::Prowess => "Whenever you cast a noncreature spell, this creature gets +1/+1 until end of turn.".into(),
        K::Amplify { amount, types } => format!("As this creature enters, put {} on it for each {} card you reveal in your hand.", counters(*amount, "+1/+1"), types.join(" and/or ")),
        K::Champion(t) => format!("When this enters, sacrifice it unless you exile another {} you control. When this leaves the battlefield, that card returns to the battlefield.", t),
        K::Ward(cost) => format!("Whenever this becomes the target of a spell or ability an opponent controls, counter it unless that player pays {}.", cost),
        K::Echo(cost) => format!("At the beginning of your upkeep, if this came under your control since your last upkeep, sacrifice it unless you pay {}.", cost),
        K::CumulativeUpkeep(cost) => format!("At the beginning of your upkeep, put an age counter on this permanent, then sacrifice it unless you pay {} for each age counter on it.", cost),
        K::Ingest => "Whenever this creature deals combat damage to a player, that player exiles the top card of their library.".into(),
        K::Rebound => "If you cast this spell from your hand, exile it as it resolves. At the beginning of your next upkeep, you may cast this card from exile without paying its mana cost.".into(),
        K::UmbraArmor => "If enchanted creature would be destroyed, instead remove all damage from it and destroy this Aura.".into(),
        K::Ravenous => "This creature enters with X +1/+1 counters on it. If X is 5 or more, draw a card when it enters.".into(),

        K::Equip { cost, restriction } => match restriction {
            Some(r) => format!("{}: Attach to target {} you control. Equip only as a sorcery.", cost, r.description),
            None => format!("{}: Attach to target creature you control. Equip only as a sorcery.", cost),
        },
        K::Fortify(cost) => format!("{}: Attach to target land you control. Fortify only as a sorcery.", cost),
        K::Reconfigure(cost) => format!("{}: Attach to target creature you control; or unattach from a creature. Reconfigure only as a sorcery. While attached, this isn't a creature.", cost),
        K::Cycling(cost) => format!("{}, Discard this card: Draw a card.", cost),
        K::Typecycling { kind, cost } => format!("{}, Discard this card: Search your library for a {} card, reveal it, put it into your hand, then shuffle.", cost, kind),
        K::Outlast(cost) => format!("{}, {{T}}: Put a +1/+1 counter on this creature. Outlast only as a sorcery.", cost),
        K::LevelUp(cost) => format!("{}: Put a level counter on this. Level up only as a sorcery.", cost),
        K::Transmute(cost) => format!("{}, Discard this card: Search your library for a card with the same mana value as this card, reveal it, put it into your hand, then shuffle. Transmute only as a sorcery.", cost),
        K::Scavenge(cost) => format!("{}, Exile this card from your graveyard: Put a number of +1/+1 counters equal to this card's power on target creature. Scavenge only as a sorcery.", cost),
        K::Unearth(cost) => format!("{}: Return this card from your graveyard to the battlefield. It gains haste. Exile it at the beginning of the next end step or if it would leave the battlefield. Unearth only as a sorcery.", cost),
        K::Embalm(cost) => format!("{}, Exile this card from your graveyard: Create a token that's a copy of it, except it's a white Zombie with no mana cost. Embalm only as a sorcery.", cost),
        K::Eternalize(cost) => format!("{}, Exile this card from your graveyard: Create a token that's a copy of it, except it's a 4/4 black Zombie with no mana cost. Eternalize only as a sorcery.", cost),
        K::Encore(cost) => format!("{}, Exile this card from your graveyard: For each opponent, create a token copy that attacks that opponent this turn if able. They gain haste. Sacrifice them at the beginning of the next end step. Activate only as a sorcery.", cost),
        K::Ninjutsu(cost) => format!("{}, Return an unblocked attacker you control to hand: Put this card onto the battlefield from your hand tapped and attacking.", cost),
        K::Crew(n) => format!("Tap any number of untapped creatures you control with total power {n} or more: This Vehicle becomes an artifact creature until end of turn."),

        K::Flashback(Some(cost)) => format!("You may cast this card from your graveyard for its flashback cost {}. Then exile it.", cost),
        K::Flashback(None) => "You may cast this card from your graveyard for its mana cost. Then exile it.".into(),
        K::Retrace => "You may cast this card from your graveyard by discarding a land card in addition to paying its other costs.".into(),
        K::JumpStart => "You may cast this card from your graveyard by discarding a card in addition to paying its other costs. Then exile this card.".into(),
        K::Madness(cost) => format!("If you discard this card, discard it into exile. When you do, cast it for its madness cost {} or put it into your graveyard.", cost),
        K::Morph(cost) => format!("You may cast this card face down as a 2/2 creature for {{3}}. Turn it face up any time for its morph cost {}.", cost),
        K::Megamorph(cost) => format!("You may cast this card face down as a 2/2 creature for {{3}}. Turn it face up any time for its megamorph cost {} and put a +1/+1 counter on it.", cost),
        K::Disguise(cost) => format!("You may cast this card face down for {{3}} as a 2/2 creature with ward {{2}}. Turn it face up any time for its disguise cost {}.", cost),
        K::Suspend { time, cost } => format!("Rather than cast this card from your hand, you may pay {} and exile it with {} time counters on it. At the beginning of your upkeep, remove a time counter. When the last is removed, you may cast it without paying its mana cost.", cost, time),
        K::Kicker { cost, second: None } => format!("You may pay an additional {} as you cast this spell.", cost),
        K::Kicker { cost, second: Some(second) } => format!("You may pay an additional {} and/or {} as you cast this spell.", cost, second),
        K::Multikicker(cost) => format!("You may pay an additional {} any number of times as you cast this spell.", cost),
        K::Buyback(cost) => format!("You may pay an additional {} as you cast this spell. If you do, put this card into your hand as it resolves.", cost),
        K::Entwine(cost) => format!("Choose both if you pay the entwine cost {}.", cost),
        K::Evoke(cost) => format!("You may cast this spell for its evoke cost {}. If you do, it's sacrificed when it enters.", cost),
        K::Dash(cost) => format!("You may cast this spell for its dash cost {}. If you do, it gains haste, and it's returned from the battlefield to its owner's hand at the beginning of the next end step.", cost),
        K::Blitz(cost) => format!("If you cast this spell for its blitz cost {}, it gains haste and \"When this creature dies, draw a card.\" Sacrifice it at the beginning of the next end step.", cost),
        K::Spectacle(cost) => format!("You may cast this spell for its spectacle cost {} rather than its mana cost if an opponent lost life this turn.", cost),
        K::Surge(cost) => format!("You may cast this spell for its surge cost {} if you or a teammate has cast another spell this turn.", cost),
        K::Prowl(cost) => format!("You may cast this for its prowl cost {} if you dealt combat damage to a player this turn with a creature that shares a creature type with it.", cost),
        K::Emerge(cost) => format!("You may cast this spell by sacrificing a creature and paying the emerge cost {} reduced by that creature's mana value.", cost),
        K::Escape { cost, exile } => format!("You may cast this card from your graveyard for its escape cost {} by exiling {} other cards from your graveyard.", cost, exile),
        K::Foretell(cost) => format!("During your turn, you may pay {{2}} and exile this card from your hand face down. Cast it on a later turn for its foretell cost {}.", cost),
        K::Plot(cost) => format!("You may pay {} and exile this card from your hand. Cast it as a sorcery on a later turn without paying its mana cost.", cost),
        K::Miracle(cost) => format!("You may cast this card for its miracle cost {} when you draw it if it's the first card you drew this turn.", cost),
        K::Overload(cost) => format!("You may cast this spell for its overload cost {}. If you do, change \"target\" in its text to \"each\".", cost),
        K::Replicate(cost) => format!("When you cast this spell, copy it for each time you paid its replicate cost {}.", cost),
        K::Bestow(cost) => format!("If you cast this card for its bestow cost {}, it's an Aura spell with enchant creature. It becomes a creature again if it's not attached.", cost),
        K::Splice { onto, cost } => format!("As you cast a {} spell, you may reveal this card from your hand and pay its splice cost {}. If you do, add this card's effects to that spell.", onto, cost),
        K::Disturb(cost) => format!("You may cast this card from your graveyard transformed for its disturb cost {}.", cost),
        K::Squad(cost) => format!("As an additional cost to cast this spell, you may pay {} any number of times. When this creature enters, create that many tokens that are copies of it.", cost),

        K::Other(text) => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristics::Cost;

    #[test]
    fn test_magnitude_is_rendered() {
        assert_eq!(
            reminder_text(&Keyword::Bushido(2)),
            "Whenever this creature blocks or becomes blocked, it gets +2/+2 until end of turn."
        );
        assert!(reminder_text(&Keyword::Annihilator(1)).contains("a permanent"));
        assert!(reminder_text(&Keyword::Annihilator(2)).contains("2 permanents"));
    }

    #[test]
    fn test_cost_is_rendered() {
        let text = reminder_text(&Keyword::Cycling(Cost::parse("2").unwrap()));
        assert!(text.starts_with("2, Discard this card"));
    }

    #[test]
    fn test_other_is_passthrough() {
        let k = Keyword::Other("CARDNAME can't block.".into());
        assert_eq!(reminder_text(&k), "CARDNAME can't block.");
    }
}
